mod common;

use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use jekyllwatch::exec::TaskExecutor;
use jekyllwatch::tasks::{TaskKind, TaskParams};
use jekyllwatch::watch::{CycleOutcome, Supervisor};

use common::{config_for, init_tracing, FakeExecutor};

fn touch(path: PathBuf) {
    fs::write(path, b"").unwrap();
}

#[tokio::test]
async fn build_control_file_dispatches_exactly_the_build_task() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path().join(TaskKind::JekyllBuild.control_file()));

    let executed = Arc::new(Mutex::new(Vec::new()));
    let mut sup = Supervisor::new(
        dir.path().to_path_buf(),
        config_for(dir.path()),
        FakeExecutor::new(Arc::clone(&executed)),
    );

    assert_eq!(sup.run_cycle().await, CycleOutcome::Processed);

    let executed = executed.lock().unwrap();
    assert_eq!(executed.len(), 1);

    let (name, params) = &executed[0];
    assert_eq!(name, "jekyll_build");
    assert_eq!(params.task_name, "jekyll_build");
    assert_eq!(
        params.jekyll_base_dir.as_deref().unwrap().to_str(),
        Some("/srv/blog")
    );

    // The control file is consumed; the deploy marker never existed, so
    // deploy must not have run.
    assert!(!dir.path().join(TaskKind::JekyllBuild.control_file()).exists());
}

#[tokio::test]
async fn tasks_run_in_registry_order_within_a_cycle() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path().join(TaskKind::DeployToGhPages.control_file()));
    touch(dir.path().join(TaskKind::JekyllBuild.control_file()));

    let executed = Arc::new(Mutex::new(Vec::new()));
    let mut sup = Supervisor::new(
        dir.path().to_path_buf(),
        config_for(dir.path()),
        FakeExecutor::new(Arc::clone(&executed)),
    );

    assert_eq!(sup.run_cycle().await, CycleOutcome::Processed);

    let names: Vec<String> = executed
        .lock()
        .unwrap()
        .iter()
        .map(|(name, _)| name.clone())
        .collect();
    assert_eq!(names, vec!["jekyll_build", "deploy_to_gh_pages"]);
}

#[tokio::test]
async fn build_runs_before_the_exit_check_in_the_same_cycle() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path().join(TaskKind::JekyllBuild.control_file()));
    touch(dir.path().join(TaskKind::Exit.control_file()));

    let executed = Arc::new(Mutex::new(Vec::new()));
    let mut sup = Supervisor::new(
        dir.path().to_path_buf(),
        config_for(dir.path()),
        FakeExecutor::new(Arc::clone(&executed)),
    );

    assert_eq!(sup.run_cycle().await, CycleOutcome::Exit);

    let names: Vec<String> = executed
        .lock()
        .unwrap()
        .iter()
        .map(|(name, _)| name.clone())
        .collect();
    assert_eq!(names, vec!["jekyll_build"]);

    // Both control files are consumed.
    assert!(!dir.path().join(TaskKind::JekyllBuild.control_file()).exists());
    assert!(!dir.path().join(TaskKind::Exit.control_file()).exists());
}

#[tokio::test]
async fn exit_control_file_alone_terminates_cleanly() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path().join(TaskKind::Exit.control_file()));

    let executed = Arc::new(Mutex::new(Vec::new()));
    let mut sup = Supervisor::new(
        dir.path().to_path_buf(),
        config_for(dir.path()),
        FakeExecutor::new(Arc::clone(&executed)),
    );

    assert_eq!(sup.run_cycle().await, CycleOutcome::Exit);
    assert!(executed.lock().unwrap().is_empty());
    assert!(!dir.path().join(TaskKind::Exit.control_file()).exists());
}

#[tokio::test]
async fn empty_directory_cycle_is_idle() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let executed = Arc::new(Mutex::new(Vec::new()));
    let mut sup = Supervisor::new(
        dir.path().to_path_buf(),
        config_for(dir.path()),
        FakeExecutor::new(Arc::clone(&executed)),
    );

    assert_eq!(sup.run_cycle().await, CycleOutcome::Idle);
    assert!(executed.lock().unwrap().is_empty());
}

/// Executor that removes the control file itself, so the supervisor's own
/// deletion fails afterwards.
struct SelfCleaningExecutor {
    watch_dir: PathBuf,
}

impl TaskExecutor for SelfCleaningExecutor {
    fn run_task(
        &mut self,
        kind: TaskKind,
        _params: TaskParams,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        let path = self.watch_dir.join(kind.control_file());
        Box::pin(async move {
            fs::remove_file(path).unwrap();
        })
    }
}

#[tokio::test]
async fn already_removed_control_file_is_not_fatal() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path().join(TaskKind::JekyllBuild.control_file()));

    let mut sup = Supervisor::new(
        dir.path().to_path_buf(),
        config_for(dir.path()),
        SelfCleaningExecutor {
            watch_dir: dir.path().to_path_buf(),
        },
    );

    // The supervisor's own removal fails (logged), the cycle still counts
    // as processed and the loop carries on.
    assert_eq!(sup.run_cycle().await, CycleOutcome::Processed);
}
