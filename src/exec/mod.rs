// src/exec/mod.rs

//! Process execution layer.
//!
//! Task handlers shell out through these helpers, using
//! `tokio::process::Command`:
//!
//! - [`run_argv`] for commands the supervisor composes itself (the default
//!   jekyll build, git add/commit/push). No shell is involved, so config
//!   values are never interpolated into a shell string.
//! - [`run_shell`] for the user-supplied `cmd` config value, which is a
//!   full command line and needs the platform shell.
//!
//! Exit statuses are collapsed to a single `i32` the way `wait(2)` callers
//! see them: the exit code, or the negated signal number when the process
//! was killed. [`report_task_result`] logs the three-way interpretation.

pub mod backend;

pub use backend::{RealTaskExecutor, TaskExecutor};

use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, error};

/// Run a program with an explicit argument list.
///
/// The child inherits stdio so build output stays visible.
pub async fn run_argv(program: &str, args: &[&str], dir: Option<&Path>) -> io::Result<ExitStatus> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    cmd.status().await
}

/// Run a full command line via the platform shell.
pub async fn run_shell(cmdline: &str, dir: Option<&Path>) -> io::Result<ExitStatus> {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmdline);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmdline);
        c
    };
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    cmd.status().await
}

/// Collapse an exit status to an `i32`: the exit code, or the negated
/// signal number for signal-terminated processes (unix only), or -1 when
/// neither is available.
pub fn status_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return -sig;
        }
    }
    -1
}

/// Log the outcome of a task's external command.
///
/// 0 is success (debug), negative means signal termination, positive is a
/// plain nonzero exit.
pub fn report_task_result(task_name: &str, code: i32) {
    if code == 0 {
        debug!(task = task_name, "task was executed successfully");
    } else if code < 0 {
        error!(task = task_name, "task was terminated by signal {}", -code);
    } else {
        error!(task = task_name, "task returned {}", code);
    }
}
