//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that read configuration
//! share a [`ConfigSource`].

pub mod completions;
pub mod describe;
pub mod dispatcher;
pub mod execute;
pub mod source;
pub mod tags;
pub mod validate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use source::ConfigSource;
