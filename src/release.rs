//! Release context supplied by the host.

use serde::{Deserialize, Serialize};

/// Facts about the release being published.
///
/// Any field may be empty. The context is read-only to this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseContext {
    /// Version being released, e.g. `1.2.3`.
    pub version: String,

    /// Previously released version.
    pub previous_version: String,

    /// Git tag name, e.g. `v1.2.3`.
    pub tag_name: String,

    /// Kind of release (`major`, `minor`, `patch`, ...).
    pub release_type: String,

    /// Branch the release was cut from.
    pub branch: String,
}

impl ReleaseContext {
    /// Create a context carrying only a version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_context() {
        let ctx: ReleaseContext =
            serde_json::from_str(r#"{"version": "1.2.3", "branch": "main"}"#).unwrap();
        assert_eq!(ctx.version, "1.2.3");
        assert_eq!(ctx.branch, "main");
        assert!(ctx.tag_name.is_empty());
    }

    #[test]
    fn with_version_leaves_rest_empty() {
        let ctx = ReleaseContext::with_version("2.0.0");
        assert_eq!(ctx.version, "2.0.0");
        assert!(ctx.previous_version.is_empty());
        assert!(ctx.branch.is_empty());
    }
}
