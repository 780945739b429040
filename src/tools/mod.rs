//! External collaborators: the container CLI and registry authentication.
//!
//! The orchestrator only talks to the [`ContainerTool`] and [`RegistryAuth`]
//! traits. The CLI wires in [`DockerCli`] and [`GcloudAuth`]; tests use the
//! recording doubles in [`mock`].

pub mod auth;
pub mod docker;
pub mod mock;

pub use auth::{GcloudAuth, RegistryAuth, DEFAULT_GCLOUD_BIN};
pub use docker::{ContainerTool, DockerCli, DEFAULT_DOCKER_BIN};
pub use mock::{CallLog, MockContainerTool, MockRegistryAuth, ToolCall};
