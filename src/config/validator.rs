//! Configuration validation rules.
//!
//! This module validates a resolved configuration for completeness:
//! - `project`, `image` and `source_image` must be set
//! - Artifact Registry mode needs a `repository`
//! - `auth.method` must be `gcloud` or `service_account`
//! - A service account needs `key_file` or `key_json`

use crate::config::schema::{AuthMethod, ResolvedConfig};
use crate::error::{GcrError, Result};
use serde::Serialize;
use std::fmt;

/// A single configuration problem, addressed by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted config key the issue refers to.
    pub field: String,
    /// Human-readable error message.
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration and return all issues.
///
/// Every rule is evaluated; an empty list means the configuration is
/// executable.
pub fn validate_config(config: &ResolvedConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    issues.extend(validate_required(config));
    issues.extend(validate_auth(config));

    issues
}

fn validate_required(config: &ResolvedConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if config.project.is_empty() {
        issues.push(ValidationIssue::new("project", "GCP project ID is required"));
    }

    if config.image.is_empty() {
        issues.push(ValidationIssue::new("image", "image name is required"));
    }

    if config.source_image.is_empty() {
        issues.push(ValidationIssue::new(
            "source_image",
            "source image is required",
        ));
    }

    // Legacy Container Registry is project-scoped and has no repositories.
    if config.artifact_registry && config.repository.is_empty() {
        issues.push(ValidationIssue::new(
            "repository",
            "repository name required for Artifact Registry",
        ));
    }

    issues
}

fn validate_auth(config: &ResolvedConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    match &config.auth.method {
        AuthMethod::Unknown(_) => {
            issues.push(ValidationIssue::new(
                "auth.method",
                "auth method must be 'gcloud' or 'service_account'",
            ));
        }
        AuthMethod::ServiceAccount if !config.auth.has_key() => {
            issues.push(ValidationIssue::new(
                "auth",
                "service account requires key_file or key_json",
            ));
        }
        _ => {}
    }

    issues
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &ResolvedConfig) -> Result<()> {
    let issues = validate_config(config);

    if issues.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = issues.iter().map(ToString::to_string).collect();
        Err(GcrError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
