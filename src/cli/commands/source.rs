//! Where a command's configuration comes from.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::Cli;
use crate::config::{load_config, load_env_file, load_system_env, merge_env, ConfigResolver, RawConfig};
use crate::error::{GcrError, Result};
use crate::plugin::GcrPlugin;
use crate::ui::UserInterface;

use super::dispatcher::CommandResult;

/// Config file and environment locations for one invocation.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    project_root: PathBuf,
    config: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

impl ConfigSource {
    /// Create a source rooted at `project_root` with default file names.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: None,
            env_file: None,
        }
    }

    /// Take the config and env-file overrides from the global flags.
    pub fn from_cli(project_root: &Path, cli: &Cli) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: cli.config.clone(),
            env_file: cli.env_file.clone(),
        }
    }

    /// Load the raw configuration map.
    pub fn load(&self) -> Result<RawConfig> {
        load_config(&self.project_root, self.config.as_deref())
    }

    /// A plugin whose resolver sees the process env plus the env file.
    pub fn plugin(&self) -> Result<GcrPlugin> {
        let system = load_system_env();
        let env = match &self.env_file {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    self.project_root.join(path)
                };
                tracing::debug!("Loading environment from {}", path.display());
                merge_env(&system, &load_env_file(&path)?)
            }
            None => system,
        };
        Ok(GcrPlugin::new(ConfigResolver::empty().with_env(env)))
    }
}

/// Report a configuration loading failure and pick the exit status.
///
/// Missing or unparseable files are user errors; anything else propagates.
pub fn report_load_error(err: GcrError, ui: &mut dyn UserInterface) -> Result<CommandResult> {
    match err {
        GcrError::ConfigNotFound { path } => {
            ui.error(&format!(
                "No configuration found at {}. Create it or pass --config.",
                path.display()
            ));
            Ok(CommandResult::failure(1))
        }
        GcrError::ConfigParseError { path, message } => {
            ui.error(&format!("Parse error in {}: {}", path.display(), message));
            Ok(CommandResult::failure(1))
        }
        other => Err(other),
    }
}

/// Write `value` as pretty JSON command output.
pub fn emit_json<T: Serialize>(value: &T, ui: &mut dyn UserInterface) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| GcrError::Other(e.into()))?;
    ui.output(&json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_default_config_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("gcr.yml"), "project: acme\n").unwrap();
        let raw = ConfigSource::new(temp.path()).load().unwrap();
        assert_eq!(raw["project"], "acme");
    }

    #[test]
    fn env_file_feeds_resolver_fallbacks() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("release.env"), "CLOUDSDK_CORE_PROJECT=from-env\n").unwrap();
        let cli = Cli::try_parse_from(["gcr-push", "validate", "--env-file", "release.env"]).unwrap();
        let plugin = ConfigSource::from_cli(temp.path(), &cli).plugin().unwrap();
        let config = plugin.resolver().resolve(&RawConfig::new());
        assert_eq!(config.project, "from-env");
    }

    #[test]
    fn missing_config_is_reported_as_failure() {
        let temp = TempDir::new().unwrap();
        let err = ConfigSource::new(temp.path()).load().unwrap_err();
        let mut ui = MockUI::new();
        let result = report_load_error(err, &mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("No configuration found"));
    }

    #[test]
    fn other_errors_propagate() {
        let mut ui = MockUI::new();
        let err = GcrError::Cancelled {
            step: "load".to_string(),
        };
        assert!(report_load_error(err, &mut ui).is_err());
    }
}
