// src/tasks/mod.rs

//! Task registry: the closed set of tasks, their control-file markers and
//! their resolved parameters.
//!
//! The registry is compile-time fixed. Adding a task means adding a
//! `TaskKind` variant, which forces the control-file table and the handler
//! dispatch in [`crate::exec::backend`] to be extended (exhaustive
//! matches).

pub mod build;
pub mod deploy;

use std::path::PathBuf;

use crate::config::ConfigFile;

/// One of the fixed set of named actions triggerable by dropping its
/// control file into the watch directory.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TaskKind {
    JekyllBuild,
    DeployToGhPages,
    /// Pseudo-task: presence of its control file shuts the supervisor
    /// down. It has no handler and is always checked last in a cycle.
    Exit,
}

impl TaskKind {
    /// Non-exit tasks in the order they are processed each cycle.
    ///
    /// `Exit` is deliberately not part of this list: the supervisor checks
    /// it after all other tasks, so a build or deploy queued in the same
    /// cycle still runs before shutdown.
    pub const DISPATCH_ORDER: [TaskKind; 2] = [TaskKind::JekyllBuild, TaskKind::DeployToGhPages];

    /// Task name as used for config sections and log messages.
    pub fn name(self) -> &'static str {
        match self {
            TaskKind::JekyllBuild => "jekyll_build",
            TaskKind::DeployToGhPages => "deploy_to_gh_pages",
            TaskKind::Exit => "exit",
        }
    }

    /// Control-file marker inside the watch directory.
    ///
    /// Windows dislikes bare dot-files, so the markers get a `d` prefix
    /// there.
    pub fn control_file(self) -> &'static str {
        if cfg!(windows) {
            match self {
                TaskKind::JekyllBuild => "d.BUILD",
                TaskKind::DeployToGhPages => "d.DEPLOY",
                TaskKind::Exit => "d.EXIT",
            }
        } else {
            match self {
                TaskKind::JekyllBuild => ".BUILD",
                TaskKind::DeployToGhPages => ".DEPLOY",
                TaskKind::Exit => ".EXIT",
            }
        }
    }
}

/// Resolved parameters passed to a task handler.
///
/// Built fresh per detected control file from the task's config section
/// (or the `[default]` fallback section) and discarded after the handler
/// returns.
#[derive(Debug, Clone)]
pub struct TaskParams {
    /// The task's registry name, injected for log messages.
    pub task_name: &'static str,

    /// Explicit command line; runs via the platform shell when present.
    pub cmd: Option<String>,

    /// Base directory of the jekyll site checkout.
    pub jekyll_base_dir: Option<PathBuf>,
}

/// Build the [`TaskParams`] for a task from the configuration.
pub fn resolve_params(cfg: &ConfigFile, kind: TaskKind) -> TaskParams {
    let section = cfg.section_for(kind.name());
    TaskParams {
        task_name: kind.name(),
        cmd: section.cmd.clone(),
        jekyll_base_dir: section.jekyll_base_dir.clone(),
    }
}
