// src/errors.rs

//! Crate-wide error type and exit-code mapping.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JekyllwatchError {
    #[error("couldn't read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("couldn't parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no watch directory configured ([config] watch_dir)")]
    WatchDirMissing,

    #[error("watch directory {0:?} does not exist or is not a directory")]
    WatchDirInvalid(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JekyllwatchError {
    /// Process exit code for startup failures.
    ///
    /// - 1: config file unreadable or unparseable
    /// - 2: watch directory missing from the configuration, or not a
    ///   usable directory
    pub fn exit_code(&self) -> i32 {
        match self {
            JekyllwatchError::WatchDirMissing | JekyllwatchError::WatchDirInvalid(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, JekyllwatchError>;
