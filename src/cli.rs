// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `jekyllwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jekyllwatch",
    version,
    about = "Watch a directory for control files and run jekyll build / deploy tasks.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the configuration file (TOML).
    #[arg(value_name = "CONFIG_PATH")]
    pub config: PathBuf,

    /// Run exactly one poll cycle, then exit.
    #[arg(long)]
    pub once: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JEKYLLWATCH_LOG` or the `[logging]` config section
    /// decides the level.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
