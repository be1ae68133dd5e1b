// src/tasks/build.rs

//! `jekyll_build` task handler: run the site-generator build command.

use tracing::{error, warn};

use crate::exec;
use crate::tasks::TaskParams;

/// Run the build task.
///
/// An explicit `cmd` from the config runs verbatim via the shell, with the
/// working directory set to `jekyll_base_dir` when configured. Without a
/// `cmd`, the default is a drafts-included `jekyll build` rooted at the
/// base directory; if that isn't configured either, the handler logs and
/// gives up without failing the loop.
pub async fn run(params: &TaskParams) {
    let launched = if let Some(ref cmd) = params.cmd {
        exec::run_shell(cmd, params.jekyll_base_dir.as_deref()).await
    } else if let Some(ref base) = params.jekyll_base_dir {
        exec::run_argv("jekyll", &["build", "--drafts"], Some(base)).await
    } else {
        error!(
            task = params.task_name,
            "neither cmd nor jekyll_base_dir configured, skipping task"
        );
        return;
    };

    match launched {
        Ok(status) => exec::report_task_result(params.task_name, exec::status_code(&status)),
        Err(err) => warn!(
            task = params.task_name,
            error = %err,
            "execution of build command failed"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn params(cmd: Option<&str>, base: Option<PathBuf>) -> TaskParams {
        TaskParams {
            task_name: "jekyll_build",
            cmd: cmd.map(String::from),
            jekyll_base_dir: base,
        }
    }

    #[tokio::test]
    async fn explicit_cmd_runs_in_base_dir() {
        let base = tempfile::tempdir().unwrap();
        run(&params(Some("touch built"), Some(base.path().to_path_buf()))).await;

        assert!(base.path().join("built").exists());
    }

    #[tokio::test]
    async fn missing_cmd_and_base_dir_is_a_noop() {
        // Must not panic or spawn anything.
        run(&params(None, None)).await;
    }

    #[tokio::test]
    async fn failing_cmd_does_not_propagate() {
        let base = tempfile::tempdir().unwrap();
        run(&params(Some("exit 3"), Some(base.path().to_path_buf()))).await;
    }
}
