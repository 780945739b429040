//! Container CLI operations.

use crate::error::Result;
use crate::shell::{execute, execute_checked, CancellationToken, CommandOptions};

/// Default container CLI binary.
pub const DEFAULT_DOCKER_BIN: &str = "docker";

/// Local container engine operations used to promote an image.
pub trait ContainerTool {
    /// Tag `source` as `target`.
    fn tag(&self, source: &str, target: &str) -> Result<()>;

    /// Push `target` to its registry.
    fn push(&self, target: &str) -> Result<()>;

    /// Whether `image` exists locally.
    ///
    /// Best effort: any probing failure means "does not exist".
    fn exists(&self, image: &str) -> bool;
}

/// [`ContainerTool`] backed by the docker CLI.
#[derive(Debug, Clone)]
pub struct DockerCli {
    bin: String,
    cancel: Option<CancellationToken>,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new(DEFAULT_DOCKER_BIN)
    }
}

impl DockerCli {
    /// Create a client invoking `bin`.
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            cancel: None,
        }
    }

    /// Kill running commands when `cancel` fires.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Binary this client invokes.
    pub fn bin(&self) -> &str {
        &self.bin
    }

    fn options(&self) -> CommandOptions {
        CommandOptions {
            cancel: self.cancel.clone(),
            ..Default::default()
        }
    }
}

impl ContainerTool for DockerCli {
    fn tag(&self, source: &str, target: &str) -> Result<()> {
        execute_checked(&self.bin, &["tag", source, target], &self.options())?;
        Ok(())
    }

    fn push(&self, target: &str) -> Result<()> {
        execute_checked(&self.bin, &["push", target], &self.options())?;
        Ok(())
    }

    fn exists(&self, image: &str) -> bool {
        execute(&self.bin, &["image", "inspect", image], &self.options())
            .map(|r| r.success)
            .unwrap_or(false)
    }
}
