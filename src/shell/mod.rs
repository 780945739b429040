//! External command execution and cancellation.

pub mod cancel;
pub mod command;

pub use cancel::CancellationToken;
pub use command::{display_command, execute, execute_checked, CommandOptions, CommandResult};
