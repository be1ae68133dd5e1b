// src/config/validate.rs

use std::path::PathBuf;

use crate::config::model::ConfigFile;
use crate::errors::{JekyllwatchError, Result};

/// Semantic validation beyond what `serde` enforces.
///
/// The watch directory is the only hard invariant: it must be configured
/// and must exist when the supervisor starts. A missing or unusable watch
/// directory is a configuration error (process exit code 2), not a
/// transient condition to retry.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    let watch_dir = watch_dir(cfg)?;
    if !watch_dir.is_dir() {
        return Err(JekyllwatchError::WatchDirInvalid(watch_dir));
    }
    Ok(())
}

/// The configured watch directory, or the missing-watch-dir error.
pub fn watch_dir(cfg: &ConfigFile) -> Result<PathBuf> {
    cfg.config
        .watch_dir
        .clone()
        .ok_or(JekyllwatchError::WatchDirMissing)
}
