//! Error types for gcr-push operations.
//!
//! This module defines [`GcrError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration problems are reported as
//!   [`ValidationIssue`](crate::config::ValidationIssue) lists, not errors
//! - Authentication, tag and push failures abort the current run and are
//!   returned as-is; nothing is retried
//! - Use `anyhow::Error` (via `GcrError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for gcr-push operations.
#[derive(Debug, Error)]
pub enum GcrError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Configuration was rejected by validation.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Registry authentication failed for a region.
    #[error("failed to authenticate with {region}: {message}")]
    Authentication { region: String, message: String },

    /// Tagging or pushing an image failed.
    #[error("failed to {action} image {image}: {message}")]
    ToolExecution {
        action: String,
        image: String,
        message: String,
    },

    /// The run was cancelled or timed out before a step could complete.
    #[error("Cancelled during {step}")]
    Cancelled { step: String },

    /// External command exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}\n{output}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GcrError {
    /// Whether this error came from cancellation or a timeout.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GcrError::Cancelled { .. })
    }
}

/// Result type alias for gcr-push operations.
pub type Result<T> = std::result::Result<T, GcrError>;
