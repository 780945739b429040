//! Configuration resolution and validation.
//!
//! This module handles all aspects of configuration:
//! - Typed configuration in [`schema`]
//! - Raw-map resolution with env fallbacks in [`resolver`]
//! - Validation in [`validator`]
//! - File loading for the CLI host in [`loader`] and [`merger`]
//! - Environment sources in [`environment`]
//!
//! # Example
//!
//! ```
//! use gcr_push::config::{validate_config, ConfigResolver, RawConfig};
//! use serde_json::json;
//!
//! let raw: RawConfig = json!({
//!     "project": "my-project",
//!     "repository": "containers",
//!     "image": "app",
//!     "source_image": "app:build",
//! })
//! .as_object()
//! .cloned()
//! .unwrap();
//!
//! let config = ConfigResolver::default().resolve(&raw);
//! assert!(validate_config(&config).is_empty());
//! assert_eq!(config.tags, vec!["{{.Version}}".to_string()]);
//! ```

pub mod environment;
pub mod loader;
pub mod merger;
pub mod resolver;
pub mod schema;
pub mod validator;

// Schema re-exports
pub use schema::{
    AuthConfig, AuthMethod, MultiRegionConfig, RawConfig, ResolvedConfig, DEFAULT_REGION,
    DEFAULT_TAG,
};

// Resolver re-exports
pub use resolver::{ConfigResolver, KEY_FILE_ENV, KEY_JSON_ENV, PROJECT_ENV};

// Validator re-exports
pub use validator::{validate, validate_config, ValidationIssue};

// Loader re-exports
pub use loader::{
    load_config, load_config_file, load_project_config, CONFIG_FILE, LOCAL_CONFIG_FILE,
};

// Environment re-exports
pub use environment::{load_env_file, load_system_env, merge_env};
