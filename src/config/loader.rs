//! Configuration file loading.
//!
//! The library core takes an untyped [`RawConfig`] map. When run from the
//! command line, that map is read from a YAML (or JSON) file:
//!
//! 1. The explicit `--config` path, loaded alone, or
//! 2. `gcr.yml` in the working directory, overlaid by `gcr.local.yml` when present

use crate::config::merger::merge_configs;
use crate::config::schema::RawConfig;
use crate::error::{GcrError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default project config file name.
pub const CONFIG_FILE: &str = "gcr.yml";

/// Optional local override file name.
pub const LOCAL_CONFIG_FILE: &str = "gcr.local.yml";

/// Load a config file as a raw YAML value.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GcrError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            GcrError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| GcrError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Convert a YAML document into a raw configuration map.
///
/// An empty document yields an empty map. Anything other than a mapping at
/// the top level is rejected.
pub fn to_raw_config(value: serde_yaml::Value, source_path: &Path) -> Result<RawConfig> {
    if value.is_null() {
        return Ok(RawConfig::new());
    }

    let json: serde_json::Value =
        serde_json::to_value(&value).map_err(|e| GcrError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    match json {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(GcrError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: format!("expected a mapping at the top level, found {}", other),
        }),
    }
}

/// Load a single config file into a raw map.
pub fn load_config_file(path: &Path) -> Result<RawConfig> {
    let value = load_config_value(path)?;
    to_raw_config(value, path)
}

/// Load the project config from `dir`, applying the local override file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if `gcr.yml` is missing.
pub fn load_project_config(dir: &Path) -> Result<RawConfig> {
    let base_path = dir.join(CONFIG_FILE);
    let mut layers = vec![load_config_value(&base_path)?];

    let local_path = dir.join(LOCAL_CONFIG_FILE);
    if local_path.exists() {
        tracing::debug!("Applying local overrides from {}", local_path.display());
        layers.push(load_config_value(&local_path)?);
    }

    to_raw_config(merge_configs(&layers), &base_path)
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
pub fn load_config(dir: &Path, config_override: Option<&Path>) -> Result<RawConfig> {
    match config_override {
        Some(path) => load_config_file(&resolve_path(dir, path)),
        None => load_project_config(dir),
    }
}

fn resolve_path(dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}
