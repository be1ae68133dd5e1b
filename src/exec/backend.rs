// src/exec/backend.rs

//! Pluggable task-executor abstraction.
//!
//! The supervision loop talks to a [`TaskExecutor`] instead of calling the
//! handlers directly. This keeps the loop unit-testable: tests substitute
//! an executor that records which tasks were dispatched instead of
//! spawning real processes.
//!
//! - [`RealTaskExecutor`] is the production implementation; it matches the
//!   [`TaskKind`] exhaustively onto the handler functions, so the task set
//!   stays compile-time closed.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::tasks::{self, TaskKind, TaskParams};

/// Trait abstracting how a dispatched task is executed.
///
/// Handler failures never propagate: handlers log their own errors and the
/// loop carries on, so the future resolves to `()`.
pub trait TaskExecutor: Send {
    /// Run the handler for `kind` with the resolved `params`, to
    /// completion. The supervisor awaits this synchronously; there is no
    /// overlap between tasks.
    fn run_task(
        &mut self,
        kind: TaskKind,
        params: TaskParams,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Real executor used in production.
#[derive(Debug, Default)]
pub struct RealTaskExecutor;

impl TaskExecutor for RealTaskExecutor {
    fn run_task(
        &mut self,
        kind: TaskKind,
        params: TaskParams,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            match kind {
                TaskKind::JekyllBuild => tasks::build::run(&params).await,
                TaskKind::DeployToGhPages => tasks::deploy::run(&params).await,
                // The supervisor handles exit itself and never dispatches it.
                TaskKind::Exit => debug!("exit pseudo-task has no handler"),
            }
        })
    }
}
