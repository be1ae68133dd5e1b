// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `JEKYLLWATCH_LOG` environment variable (e.g. "info", "debug")
//! 3. `[logging] loglevel` from the config file
//! 4. default to `warn`
//!
//! Console logs go to STDERR so that task command output stays on stdout.
//! When `[logging] logfile` is set, a second non-blocking layer writes to
//! that file at the same level.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::cli::LogLevel;
use crate::config::LoggingSection;

/// Initialise the global logging subscriber.
///
/// Safe to call once at startup. The returned `WorkerGuard` must be held
/// for the process lifetime, otherwise buffered file logs are lost.
pub fn init_logging(
    cli_level: Option<LogLevel>,
    logging: &LoggingSection,
) -> Result<Option<WorkerGuard>> {
    let level = resolve_level(cli_level, logging.loglevel.as_deref());
    let filter = LevelFilter::from_level(level);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    if let Some(ref logfile) = logging.logfile {
        rotate_if_oversized(logfile, logging.logfile_maxsize)?;

        let (dir, file_name) = split_logfile_path(logfile);
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating log directory {:?}", dir))?;

        let appender = tracing_appender::rolling::never(&dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(console_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .with_filter(filter),
            )
            .init();

        return Ok(Some(guard));
    }

    tracing_subscriber::registry().with(console_layer).init();

    Ok(None)
}

fn resolve_level(cli_level: Option<LogLevel>, config_level: Option<&str>) -> tracing::Level {
    match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => std::env::var("JEKYLLWATCH_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .or_else(|| config_level.and_then(parse_level_str))
            .unwrap_or(tracing::Level::WARN),
    }
}

/// Rotate an existing logfile aside to `<logfile>.1` when it already
/// exceeds the configured size cap.
///
/// `tracing-appender` only rolls by time, so the size cap is enforced once
/// at startup rather than continuously.
fn rotate_if_oversized(logfile: &Path, max_size: u64) -> Result<()> {
    match fs::metadata(logfile) {
        Ok(meta) if meta.len() > max_size => {
            let mut rotated = logfile.as_os_str().to_os_string();
            rotated.push(".1");
            fs::rename(logfile, PathBuf::from(&rotated))
                .with_context(|| format!("rotating oversized logfile {:?}", logfile))?;
        }
        _ => {}
    }
    Ok(())
}

fn split_logfile_path(logfile: &Path) -> (PathBuf, String) {
    let dir = match logfile.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = logfile
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "jekyllwatch.log".to_string());
    (dir, file_name)
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" | "critical" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
