use crate::errors::{Result, ShelfError};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished git invocation
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `git` with the given arguments in `repo_path`, suspending until the
/// process exits.
///
/// The exit status is reported, never interpreted: callers decide which codes
/// are acceptable. No timeout is imposed, and the child is not forcibly
/// interrupted; once started it runs to completion even if the caller stops
/// waiting on it.
pub async fn run_git(repo_path: &Path, args: &[&str]) -> Result<GitOutput> {
    debug!("git {} (in {})", args.join(" "), repo_path.display());

    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .stdin(Stdio::null())
        .output()
        .await?;

    Ok(GitOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Run `git`, treating any non-zero exit as an error carrying stderr.
pub async fn run_git_checked(repo_path: &Path, args: &[&str]) -> Result<GitOutput> {
    let output = run_git(repo_path, args).await?;
    if output.success() {
        Ok(output)
    } else {
        Err(ShelfError::GitCommand {
            args: args.join(" "),
            exit_code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        })
    }
}
