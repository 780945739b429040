//! Execute command implementation.
//!
//! The `gcr-push execute` command validates the configuration, then tags
//! and pushes the source image to every target registry.

use std::time::Duration;

use crate::cli::args::ExecuteArgs;
use crate::error::Result;
use crate::plugin::{ExecuteRequest, ExecuteResponse};
use crate::shell::CancellationToken;
use crate::tools::{DockerCli, GcloudAuth};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::source::{emit_json, report_load_error, ConfigSource};
use super::validate::report_issues;

/// The execute command implementation.
pub struct ExecuteCommand {
    source: ConfigSource,
    args: ExecuteArgs,
    cancel: CancellationToken,
}

impl ExecuteCommand {
    /// Create a new execute command.
    pub fn new(source: ConfigSource, args: ExecuteArgs) -> Self {
        Self {
            source,
            args,
            cancel: CancellationToken::new(),
        }
    }

    /// Abort the push when `cancel` fires.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    fn cancel_token(&self) -> CancellationToken {
        match self.args.timeout {
            Some(secs) => self.cancel.child_with_timeout(Duration::from_secs(secs)),
            None => self.cancel.clone(),
        }
    }
}

impl Command for ExecuteCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let raw = match self.source.load() {
            Ok(raw) => raw,
            Err(e) => return report_load_error(e, ui),
        };
        let plugin = self.source.plugin()?;

        if self.args.skip_validation {
            tracing::debug!("Skipping validation");
        } else {
            let response = plugin.validate(&raw);
            if !response.valid {
                if self.args.json {
                    emit_json(&response, ui)?;
                } else {
                    report_issues(&response, ui);
                }
                return Ok(CommandResult::failure(1));
            }
        }

        let artifact_registry = plugin.resolver().resolve(&raw).artifact_registry;
        let cancel = self.cancel_token();
        let docker = DockerCli::new(self.args.docker_bin.clone()).with_cancel(cancel.clone());
        let auth = GcloudAuth::new(artifact_registry)
            .with_gcloud_bin(self.args.gcloud_bin.clone())
            .with_docker_bin(self.args.docker_bin.clone())
            .with_cancel(cancel.clone());

        let request = ExecuteRequest {
            config: raw,
            context: self.args.release.to_context(),
            dry_run: self.args.dry_run,
        };

        match plugin.execute(&request, &docker, &auth, cancel, ui) {
            Ok(response) => {
                if self.args.json {
                    emit_json(&response, ui)?;
                } else {
                    ui.success(&response.message);
                }
                Ok(CommandResult::success())
            }
            Err(e) if self.args.json => {
                emit_json(&ExecuteResponse::failure(e.to_string()), ui)?;
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}
