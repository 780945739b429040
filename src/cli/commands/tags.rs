//! Tags command implementation.
//!
//! The `gcr-push tags` command prints the fully-qualified references a push
//! would produce, one per line, without touching any registry.

use crate::cli::args::TagsArgs;
use crate::error::Result;
use crate::push::PushPlan;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::source::{emit_json, report_load_error, ConfigSource};

/// The tags command implementation.
pub struct TagsCommand {
    source: ConfigSource,
    args: TagsArgs,
}

impl TagsCommand {
    /// Create a new tags command.
    pub fn new(source: ConfigSource, args: TagsArgs) -> Self {
        Self { source, args }
    }
}

impl Command for TagsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let raw = match self.source.load() {
            Ok(raw) => raw,
            Err(e) => return report_load_error(e, ui),
        };
        let config = self.source.plugin()?.resolver().resolve(&raw);
        let plan = PushPlan::new(&config, &self.args.release.to_context());

        if self.args.json {
            emit_json(&plan, ui)?;
            return Ok(CommandResult::success());
        }

        if plan.tags.is_empty() {
            ui.warning("No tags resolved; nothing would be pushed");
        }
        for target in plan.targets() {
            ui.output(&target);
        }
        Ok(CommandResult::success())
    }
}
