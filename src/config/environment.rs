//! Environment variable sources for configuration fallbacks.
//!
//! The resolver never reads `std::env` directly. It is handed a map built
//! from the process environment, optionally overlaid with a dotenv-style
//! file supplied by the host.

use crate::error::{GcrError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Load environment variables from system.
pub fn load_system_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Load environment variables from a dotenv-style file.
///
/// # Format
///
/// ```text
/// # Comment
/// KEY=value
/// QUOTED="value with spaces"
/// SINGLE='also works'
/// ```
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` for invalid lines.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GcrError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            GcrError::Io(e)
        }
    })?;

    parse_dotenv(&content, path)
}

fn parse_dotenv(content: &str, source_path: &Path) -> Result<HashMap<String, String>> {
    let mut env = HashMap::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(GcrError::ConfigParseError {
                path: source_path.to_path_buf(),
                message: format!("Invalid line {}: {}", line_num + 1, line),
            });
        };

        let key = key.trim().trim_start_matches("export ").trim();
        let mut value = value.trim();
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }

        env.insert(key.to_string(), value.to_string());
    }

    Ok(env)
}

/// Merge environment maps in precedence order.
///
/// Values in `overlay` take precedence over values in `base`.
pub fn merge_env(
    base: &HashMap<String, String>,
    overlay: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut result = base.clone();
    result.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    result
}
