// src/watch/supervisor.rs

//! The supervision loop: poll the watch directory, dispatch control files
//! to their task handlers, delete them, and watch for the exit signal.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, UNIX_EPOCH};

use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::exec::TaskExecutor;
use crate::tasks::{resolve_params, TaskKind};

/// Sentinel mtime: "never observed" or "poll failed". Always less than any
/// real epoch timestamp.
const MTIME_NEVER: i64 = -1;

/// What a single poll cycle did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Directory mtime unchanged since the last cycle; no scan happened.
    Unchanged,
    /// Scanned, but no control files were present.
    Idle,
    /// At least one task was dispatched.
    Processed,
    /// The exit control file was found; the loop must terminate.
    Exit,
}

/// Drives the polling/dispatch cycle until an exit signal.
///
/// Single-threaded and strictly sequential: one cycle fully completes
/// before the next begins, and every task handler is awaited to completion
/// before the next control file is considered.
pub struct Supervisor<E> {
    watch_dir: PathBuf,
    interval: Duration,
    cfg: ConfigFile,
    executor: E,
    mtime_last: i64,
}

impl<E: TaskExecutor> Supervisor<E> {
    pub fn new(watch_dir: PathBuf, cfg: ConfigFile, executor: E) -> Self {
        let interval = Duration::from_secs(cfg.config.watch_interval);
        Self {
            watch_dir,
            interval,
            cfg,
            executor,
            mtime_last: MTIME_NEVER,
        }
    }

    /// Poll until the exit control file shows up or Ctrl-C arrives.
    pub async fn run(mut self) -> Result<()> {
        info!(
            dir = %self.watch_dir.display(),
            interval_secs = self.interval.as_secs(),
            "supervising watch directory"
        );
        loop {
            if self.run_cycle().await == CycleOutcome::Exit {
                return Ok(());
            }
            tokio::select! {
                _ = sleep(self.interval) => {}
                res = tokio::signal::ctrl_c() => {
                    res?;
                    info!("received Ctrl-C, exiting");
                    return Ok(());
                }
            }
        }
    }

    /// One full poll cycle, without the inter-cycle sleep.
    ///
    /// 1. Read the watch directory's mtime; a failed read logs an error
    ///    and counts as [`MTIME_NEVER`], it does not suppress dispatch.
    /// 2. If the mtime equals the previous observation, skip the scan
    ///    entirely (optimization only: control files are create/delete
    ///    operations on the directory, so they bump its mtime).
    /// 3. For each non-exit task in registry order, dispatch its handler
    ///    if the control file is present, then delete the file.
    /// 4. Check for the exit control file last, so work queued in the same
    ///    cycle runs before shutdown.
    /// 5. Remember the observed mtime.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        debug!("new poll cycle");
        let mtime = dir_mtime_secs(&self.watch_dir);
        if mtime == self.mtime_last {
            return CycleOutcome::Unchanged;
        }

        let mut processed = false;
        for kind in TaskKind::DISPATCH_ORDER {
            let ctrl_file = self.watch_dir.join(kind.control_file());
            if !ctrl_file.exists() {
                continue;
            }
            processed = true;

            let params = resolve_params(&self.cfg, kind);
            let started = Instant::now();
            self.executor.run_task(kind, params).await;
            debug!(
                task = kind.name(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "task finished"
            );

            remove_control_file(&ctrl_file);
        }

        let exit_file = self.watch_dir.join(TaskKind::Exit.control_file());
        if exit_file.exists() {
            info!(
                file = TaskKind::Exit.control_file(),
                "found exit control file, exiting"
            );
            remove_control_file(&exit_file);
            return CycleOutcome::Exit;
        }

        self.mtime_last = mtime;
        if processed {
            CycleOutcome::Processed
        } else {
            CycleOutcome::Idle
        }
    }
}

/// Best-effort control-file removal. A failure is logged and otherwise
/// ignored; the file may be reprocessed next cycle.
fn remove_control_file(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        error!(
            file = %path.display(),
            error = %err,
            "couldn't remove control file"
        );
    }
}

/// Watch-directory mtime in whole seconds since the epoch, or
/// [`MTIME_NEVER`] when the directory can't be read.
fn dir_mtime_secs(dir: &Path) -> i64 {
    match std::fs::metadata(dir).and_then(|m| m.modified()) {
        Ok(t) => t
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(MTIME_NEVER),
        Err(err) => {
            error!(
                dir = %dir.display(),
                error = %err,
                "couldn't get mtime of watch directory"
            );
            MTIME_NEVER
        }
    }
}
