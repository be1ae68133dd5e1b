// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod tasks;
pub mod watch;

use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::errors::Result;
use crate::exec::RealTaskExecutor;
use crate::watch::Supervisor;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + validation (exit code 1 / 2 failures happen here)
/// - logging (console + optional logfile)
/// - the supervision loop with the real task executor
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;
    let _guard = logging::init_logging(args.log_level, &cfg.logging)?;

    let watch_dir = config::validate::watch_dir(&cfg)?;
    info!(
        config = %args.config.display(),
        dir = %watch_dir.display(),
        "jekyllwatch starting"
    );

    let mut supervisor = Supervisor::new(watch_dir, cfg, RealTaskExecutor);
    if args.once {
        supervisor.run_cycle().await;
        return Ok(());
    }
    supervisor.run().await
}
