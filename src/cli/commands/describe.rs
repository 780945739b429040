//! Describe command implementation.
//!
//! The `gcr-push describe` command prints the plugin metadata a release
//! host registers.

use crate::cli::args::DescribeArgs;
use crate::error::Result;
use crate::plugin::GcrPlugin;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::source::emit_json;

/// The describe command implementation.
pub struct DescribeCommand {
    args: DescribeArgs,
}

impl DescribeCommand {
    /// Create a new describe command.
    pub fn new(args: DescribeArgs) -> Self {
        Self { args }
    }
}

impl Command for DescribeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let info = GcrPlugin::default().describe();

        if self.args.json {
            emit_json(&info, ui)?;
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("{} {}", info.name, info.version));
        ui.output(&info.description);
        let hooks: Vec<_> = info.hooks.iter().map(|h| h.as_str()).collect();
        ui.output(&format!("Hooks: {}", hooks.join(", ")));
        Ok(CommandResult::success())
    }
}
