//! Validate command implementation.
//!
//! The `gcr-push validate` command resolves the configuration and reports
//! every problem at once.

use crate::cli::args::ValidateArgs;
use crate::error::Result;
use crate::plugin::ValidateResponse;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::source::{emit_json, report_load_error, ConfigSource};

/// The validate command implementation.
pub struct ValidateCommand {
    source: ConfigSource,
    args: ValidateArgs,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(source: ConfigSource, args: ValidateArgs) -> Self {
        Self { source, args }
    }
}

/// Print validation issues as errors.
pub(super) fn report_issues(response: &ValidateResponse, ui: &mut dyn UserInterface) {
    for issue in &response.errors {
        ui.error(&issue.to_string());
    }
    ui.error(&format!(
        "Configuration has {} error(s)",
        response.errors.len()
    ));
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let raw = match self.source.load() {
            Ok(raw) => raw,
            Err(e) => return report_load_error(e, ui),
        };
        let response = self.source.plugin()?.validate(&raw);

        if self.args.json {
            emit_json(&response, ui)?;
        } else if response.valid {
            ui.success("Configuration is valid!");
        } else {
            report_issues(&response, ui);
        }

        if response.valid {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("gcr.yml"), config).unwrap();
        temp
    }

    fn run(temp: &TempDir, json: bool) -> (CommandResult, MockUI) {
        let mut ui = MockUI::new();
        let result = ValidateCommand::new(ConfigSource::new(temp.path()), ValidateArgs { json })
            .execute(&mut ui)
            .unwrap();
        (result, ui)
    }

    #[test]
    fn valid_config_succeeds() {
        let temp = setup_project(
            "project: acme\nrepository: containers\nimage: api\nsource_image: api:build\n",
        );
        let (result, ui) = run(&temp, false);
        assert!(result.success);
        assert!(!ui.successes().is_empty());
    }

    #[test]
    fn invalid_config_lists_every_issue() {
        let temp = setup_project(
            "project: acme\nartifact_registry: true\nauth:\n  method: service_account\n",
        );
        let (result, ui) = run(&temp, false);
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("image"));
        assert!(ui.has_error("source_image"));
        assert!(ui.has_error("repository"));
    }

    #[test]
    fn json_output_reports_issues() {
        let temp = setup_project("project: acme\nsource_image: api:build\nartifact_registry: false\n");
        let (result, ui) = run(&temp, true);
        assert!(!result.success);
        let value: serde_json::Value = serde_json::from_str(&ui.output_text()).unwrap();
        assert_eq!(value["valid"], false);
        assert!(value["errors"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e["field"] == "image"));
    }

    #[test]
    fn missing_config_fails() {
        let temp = TempDir::new().unwrap();
        let (result, ui) = run(&temp, false);
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("No configuration found"));
    }
}
