//! gcr-push - Promote built container images into Google registries.
//!
//! A release plugin that re-tags a locally built image and pushes it to
//! Artifact Registry (`{region}-docker.pkg.dev`) or legacy Container
//! Registry (`gcr.io` and friends), optionally across several regions.
//!
//! # Modules
//!
//! - [`cli`] - Command-line host for the plugin
//! - [`config`] - Configuration resolution, validation and file loading
//! - [`error`] - Error types and result aliases
//! - [`plugin`] - Describe, validate and execute lifecycle
//! - [`push`] - Multi-region tag-and-push orchestration
//! - [`registry`] - Registry hostnames and image references
//! - [`release`] - Release context supplied by the host
//! - [`shell`] - External command execution and cancellation
//! - [`template`] - Tag template resolution
//! - [`tools`] - Container and authentication tool adapters
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use gcr_push::config::ResolvedConfig;
//! use gcr_push::push::PushPlan;
//! use gcr_push::release::ReleaseContext;
//!
//! let config = ResolvedConfig {
//!     project: "acme".to_string(),
//!     repository: "containers".to_string(),
//!     image: "api".to_string(),
//!     source_image: "api:build".to_string(),
//!     tags: vec!["v{{.Version}}".to_string(), "latest".to_string()],
//!     ..Default::default()
//! };
//!
//! let plan = PushPlan::new(&config, &ReleaseContext::with_version("1.4.0"));
//! assert_eq!(
//!     plan.targets(),
//!     vec![
//!         "us-central1-docker.pkg.dev/acme/containers/api:v1.4.0",
//!         "us-central1-docker.pkg.dev/acme/containers/api:latest",
//!     ]
//! );
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod plugin;
pub mod push;
pub mod registry;
pub mod release;
pub mod shell;
pub mod template;
pub mod tools;
pub mod ui;

pub use error::{GcrError, Result};
