// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// watch_dir = "/home/me/Dropbox/jekyll-remote"
/// watch_interval = 60
///
/// [logging]
/// logfile = "/var/log/jekyllwatch.log"
/// logfile_maxsize = 10485760
/// loglevel = "debug"
///
/// [task.jekyll_build]
/// jekyll_base_dir = "/srv/blog"
///
/// [task.deploy_to_gh_pages]
/// jekyll_base_dir = "/srv/blog"
/// ```
///
/// All sections except `[config]` are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Watch directory and poll interval from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Log sink configuration from `[logging]`.
    #[serde(default)]
    pub logging: LoggingSection,

    /// Fallback parameters from `[default]`, used for tasks without their
    /// own `[task.<name>]` section.
    #[serde(default)]
    pub default: TaskSection,

    /// Per-task parameters from `[task.<name>]`.
    ///
    /// Keys are the task names (`jekyll_build`, `deploy_to_gh_pages`).
    #[serde(default)]
    pub task: BTreeMap<String, TaskSection>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigSection {
    /// Directory polled for control files.
    ///
    /// Must exist at startup; missing it is a fatal configuration error.
    #[serde(default, alias = "watchdir")]
    pub watch_dir: Option<PathBuf>,

    /// Poll interval in seconds, also used as the pause after a failed
    /// directory read.
    #[serde(default = "default_watch_interval")]
    pub watch_interval: u64,
}

fn default_watch_interval() -> u64 {
    60
}

/// `[logging]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Optional logfile; when set, logs go to this file in addition to
    /// stderr.
    #[serde(default)]
    pub logfile: Option<PathBuf>,

    /// Size cap for the logfile in bytes. When the file already exceeds
    /// this at startup it is rotated aside to `<logfile>.1`.
    #[serde(default = "default_logfile_maxsize")]
    pub logfile_maxsize: u64,

    /// Log level name (error, warn, info, debug, trace).
    #[serde(default)]
    pub loglevel: Option<String>,
}

fn default_logfile_maxsize() -> u64 {
    10 * 1024 * 1024
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            logfile: None,
            logfile_maxsize: default_logfile_maxsize(),
            loglevel: None,
        }
    }
}

/// `[task.<name>]` (and `[default]`) section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TaskSection {
    /// Explicit command line, run via the platform shell.
    ///
    /// If absent, the handler's built-in command is used.
    #[serde(default)]
    pub cmd: Option<String>,

    /// Base directory of the jekyll site checkout. Working directory for
    /// the build command; repository root for the deploy task.
    #[serde(default)]
    pub jekyll_base_dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Parameter section for a task: its own `[task.<name>]` section if
    /// present, otherwise `[default]`.
    pub fn section_for(&self, task_name: &str) -> &TaskSection {
        self.task.get(task_name).unwrap_or(&self.default)
    }
}
