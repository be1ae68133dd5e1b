// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;
use crate::errors::{JekyllwatchError, Result};

/// Load a configuration file from a given path and return the raw
/// `ConfigFile`.
///
/// This only performs TOML deserialization; it does **not** check that the
/// watch directory is usable. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| JekyllwatchError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let config: ConfigFile =
        toml::from_str(&contents).map_err(|source| JekyllwatchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(config)
}

/// Load a configuration file from path and run semantic validation.
///
/// This is the entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks that `[config] watch_dir` is set and points at an existing
///   directory.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}
