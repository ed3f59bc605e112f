pub mod changes;
pub mod process;
pub mod repository;

pub use changes::{changed_files, FileChange, FileStatus};
pub use process::{run_git, run_git_checked, GitOutput};
pub use repository::GitRepository;

use crate::errors::{Result, ShelfError};
use std::path::Path;

/// Find the root of the Git repository
pub fn find_repository_root(start_path: &Path) -> Result<std::path::PathBuf> {
    let repo = git2::Repository::discover(start_path).map_err(ShelfError::Git)?;

    let workdir = repo
        .workdir()
        .ok_or_else(|| ShelfError::config("Repository has no working directory (bare repo?)"))?;

    Ok(workdir.to_path_buf())
}
