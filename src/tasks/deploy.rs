// src/tasks/deploy.rs

//! `deploy_to_gh_pages` task handler: stage, commit and push pending
//! changes in the site checkout.

use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{debug, error};

use crate::exec;
use crate::tasks::TaskParams;

/// First line of every automated commit message.
const COMMIT_MARKER: &str = "Automated commit by jekyllwatch";

/// Git's commit-message template starts with this many comment lines
/// before listing the staged files.
const EDITMSG_HEADER_LINES: usize = 6;

/// How recently `.git/COMMIT_EDITMSG` must have been touched for its
/// contents to be considered produced by our own `git add`.
const EDITMSG_FRESH_WINDOW: Duration = Duration::from_secs(30);

/// Run the deploy task.
///
/// Stages everything, composes a commit message (opportunistically
/// enriched with the changed-file list from git's commit-message scratch
/// file), commits and pushes. Commit and push count as one combined step:
/// their return codes are accumulated and reported through the usual
/// three-way interpretation.
pub async fn run(params: &TaskParams) {
    let Some(ref base) = params.jekyll_base_dir else {
        error!(
            task = params.task_name,
            params = ?params,
            "couldn't find jekyll_base_dir in config, skipping task"
        );
        return;
    };

    // Stage first; without it there is nothing to commit and no scratch
    // file to mine.
    match exec::run_argv("git", &["add", "-A"], Some(base)).await {
        Ok(status) => {
            let code = exec::status_code(&status);
            if code != 0 {
                error!(
                    task = params.task_name,
                    code, "'git add -A' failed, aborting deploy"
                );
                return;
            }
        }
        Err(err) => {
            error!(
                task = params.task_name,
                error = %err,
                "error while 'git add'ing, aborting"
            );
            return;
        }
    }

    let mut commit_msg = vec![COMMIT_MARKER.to_string()];
    let editmsg = base.join(".git").join("COMMIT_EDITMSG");
    match changed_files_from_editmsg(&editmsg, SystemTime::now()) {
        Ok(Some(files)) => commit_msg.extend(files),
        Ok(None) => debug!(
            task = params.task_name,
            "COMMIT_EDITMSG not touched recently, skipping it"
        ),
        Err(err) => debug!(
            task = params.task_name,
            error = %err,
            "problem reading COMMIT_EDITMSG, skipping it"
        ),
    }

    let message = commit_msg.join("\n");
    match commit_and_push(base, &message).await {
        Ok(code) => exec::report_task_result(params.task_name, code),
        Err(err) => error!(task = params.task_name, error = %err, "task failed"),
    }
}

/// Commit with the composed message, then push.
///
/// Push only runs after a clean commit (the pair behaves like
/// `git commit ... && git push`); the codes are accumulated so the caller
/// sees one combined result.
async fn commit_and_push(base: &Path, message: &str) -> io::Result<i32> {
    let commit = exec::run_argv("git", &["commit", "-m", message], Some(base)).await?;
    let mut code = exec::status_code(&commit);
    if code == 0 {
        let push = exec::run_argv("git", &["push"], Some(base)).await?;
        code += exec::status_code(&push);
    }
    Ok(code)
}

/// Changed-file lines from git's commit-message scratch file.
///
/// Returns `Ok(None)` when the file exists but wasn't modified within the
/// freshness window, meaning our `git add` didn't touch it and its
/// contents belong to some earlier commit. Lines are stripped of the
/// comment prefix and surrounding spaces; the fixed template header is
/// skipped.
fn changed_files_from_editmsg(path: &Path, now: SystemTime) -> io::Result<Option<Vec<String>>> {
    let mtime = std::fs::metadata(path)?.modified()?;
    // An mtime in the future counts as fresh.
    let fresh = now
        .duration_since(mtime)
        .map(|age| age < EDITMSG_FRESH_WINDOW)
        .unwrap_or(true);
    if !fresh {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)?;
    let files = contents
        .lines()
        .skip(EDITMSG_HEADER_LINES)
        .map(|line| line.trim_matches(['#', ' ']).to_string())
        .collect();
    Ok(Some(files))
}
