//! Configuration file loading.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::env::{apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::types::KvConfig;
use crate::validate::validate;

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Load a config file, apply environment fallbacks and validate.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, is too large, does
/// not parse, or fails validation.
pub fn load_file(path: &Path) -> ConfigResult<KvConfig> {
    load_file_with_env(path, &collect_env_vars())
}

/// [`load_file`] with an explicit variable set instead of the process
/// environment.
///
/// # Errors
///
/// See [`load_file`].
pub fn load_file_with_env(path: &Path, vars: &HashMap<String, String>) -> ConfigResult<KvConfig> {
    // Check file size before reading to prevent OOM.
    let metadata = std::fs::metadata(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!(path = %path.display(), "loaded config file");
    parse(&content, &path.display().to_string(), vars)
}

/// Parse TOML text, apply environment fallbacks and validate.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the text does not parse or fails validation.
pub fn from_toml_str(content: &str) -> ConfigResult<KvConfig> {
    parse(content, "<string>", &collect_env_vars())
}

/// [`from_toml_str`] with an explicit variable set.
///
/// # Errors
///
/// See [`from_toml_str`].
pub fn from_toml_str_with_env(
    content: &str,
    vars: &HashMap<String, String>,
) -> ConfigResult<KvConfig> {
    parse(content, "<string>", vars)
}

fn parse(content: &str, origin: &str, vars: &HashMap<String, String>) -> ConfigResult<KvConfig> {
    let mut config: KvConfig = toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: origin.to_owned(),
        source: e,
    })?;
    apply_env_fallbacks(&mut config, vars);
    validate(&config)?;
    Ok(config)
}
