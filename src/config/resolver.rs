//! Raw configuration resolution.
//!
//! Resolution never fails. Each scalar is looked up in this order:
//!
//! 1. The explicit key in the raw map (non-empty, correct type)
//! 2. A named environment variable (`project`, `auth.key_file`, `auth.key_json` only)
//! 3. The literal default
//!
//! Wrong-typed values are ignored as if absent. Rejecting bad input is the
//! validator's job.

use crate::config::environment::load_system_env;
use crate::config::schema::{
    AuthConfig, AuthMethod, MultiRegionConfig, RawConfig, ResolvedConfig, DEFAULT_REGION,
    DEFAULT_TAG,
};
use serde_json::Value;
use std::collections::HashMap;

/// Environment fallback for `project`.
pub const PROJECT_ENV: &str = "CLOUDSDK_CORE_PROJECT";

/// Environment fallback for `auth.key_file`.
pub const KEY_FILE_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Environment fallback for `auth.key_json`.
pub const KEY_JSON_ENV: &str = "GCP_SERVICE_ACCOUNT_JSON";

/// Turns raw configuration maps into [`ResolvedConfig`] values.
///
/// `Default` reads fallbacks from the process environment, like [`new`](Self::new).
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    env: HashMap<String, String>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Create a resolver that reads fallbacks from the process environment.
    pub fn new() -> Self {
        Self {
            env: load_system_env(),
        }
    }

    /// Create a resolver with no environment fallbacks.
    pub fn empty() -> Self {
        Self {
            env: HashMap::new(),
        }
    }

    /// Replace the environment used for fallbacks.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Resolve a raw configuration map.
    pub fn resolve(&self, raw: &RawConfig) -> ResolvedConfig {
        let empty = RawConfig::new();
        let auth = section(raw, "auth").unwrap_or(&empty);
        let multi_region = section(raw, "multi_region").unwrap_or(&empty);

        let mut tags = get_string_list(raw, "tags");
        if tags.is_empty() {
            tracing::debug!("No tags configured, defaulting to {}", DEFAULT_TAG);
            tags = vec![DEFAULT_TAG.to_string()];
        }

        ResolvedConfig {
            artifact_registry: get_bool(raw, "artifact_registry", true),
            project: self
                .get_string(raw, "project", Some(PROJECT_ENV))
                .unwrap_or_default(),
            region: self
                .get_string(raw, "region", None)
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            repository: self.get_string(raw, "repository", None).unwrap_or_default(),
            image: self.get_string(raw, "image", None).unwrap_or_default(),
            auth: AuthConfig {
                method: AuthMethod::parse(
                    &self.get_string(auth, "method", None).unwrap_or_default(),
                ),
                key_file: self.get_string(auth, "key_file", Some(KEY_FILE_ENV)),
                key_json: self.get_string(auth, "key_json", Some(KEY_JSON_ENV)),
            },
            source_image: self
                .get_string(raw, "source_image", None)
                .unwrap_or_default(),
            tags,
            multi_region: MultiRegionConfig {
                enabled: get_bool(multi_region, "enabled", false),
                regions: get_string_list(multi_region, "regions"),
            },
            dry_run: get_bool(raw, "dry_run", false),
        }
    }

    /// Look up a string: raw key, then environment variable.
    fn get_string(&self, raw: &RawConfig, key: &str, env_key: Option<&str>) -> Option<String> {
        if let Some(Value::String(value)) = raw.get(key) {
            if !value.is_empty() {
                return Some(value.clone());
            }
        }

        env_key
            .and_then(|name| self.env.get(name))
            .filter(|value| !value.is_empty())
            .cloned()
    }
}

fn section<'a>(raw: &'a RawConfig, key: &str) -> Option<&'a RawConfig> {
    raw.get(key).and_then(Value::as_object)
}

fn get_bool(raw: &RawConfig, key: &str, default: bool) -> bool {
    raw.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn get_string_list(raw: &RawConfig, key: &str) -> Vec<String> {
    match raw.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
