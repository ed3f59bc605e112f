pub mod apply;
pub mod completions;
pub mod drop;
pub mod list;
pub mod save;
pub mod show;

use crate::errors::{Result, ShelfError};
use crate::git::find_repository_root;
use crate::stash::StashManager;
use std::env;

/// Open the StashManager for the repository containing the current directory
pub(crate) fn manager_for_cwd() -> Result<StashManager> {
    let current_dir = env::current_dir()
        .map_err(|e| ShelfError::config(format!("Could not get current directory: {e}")))?;
    let repo_root = find_repository_root(&current_dir)?;
    StashManager::new(&repo_root)
}
