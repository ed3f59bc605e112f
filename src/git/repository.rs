use crate::errors::{Result, ShelfError};
use git2::Repository;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with the state queries the stash
/// operations consume
pub struct GitRepository {
    repo: Repository,
    path: PathBuf,
}

impl GitRepository {
    /// Open a Git repository at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .map_err(|e| ShelfError::config(format!("Not a git repository: {}", e)))?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| ShelfError::config("Repository has no working directory"))?
            .to_path_buf();

        Ok(Self {
            repo,
            path: workdir,
        })
    }

    /// Path to the repository's working directory root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current branch name
    pub fn current_branch(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .map_err(|e| ShelfError::config(format!("Could not get HEAD: {}", e)))?;

        if let Some(name) = head.shorthand() {
            Ok(name.to_string())
        } else {
            // Detached HEAD - return commit hash
            let commit = head
                .peel_to_commit()
                .map_err(|e| ShelfError::config(format!("Could not get HEAD commit: {}", e)))?;
            Ok(format!("HEAD@{}", commit.id()))
        }
    }

    /// Get the HEAD commit hash
    pub fn head_sha(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .map_err(|e| ShelfError::config(format!("Could not get HEAD: {}", e)))?;

        let commit = head
            .peel_to_commit()
            .map_err(|e| ShelfError::config(format!("Could not get HEAD commit: {}", e)))?;

        Ok(commit.id().to_string())
    }

    /// Whether the repository has no commit history yet
    pub fn is_unborn(&self) -> bool {
        match self.repo.head() {
            Ok(_) => false,
            Err(e) => matches!(
                e.code(),
                git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound
            ),
        }
    }

    /// The in-flight operation the repository is in the middle of, if any
    /// (merge, rebase, unresolved conflicts, ...)
    pub fn in_progress_state(&self) -> Result<Option<String>> {
        use git2::RepositoryState::*;

        let label = match self.repo.state() {
            Clean => None,
            Merge => Some("merge"),
            Revert | RevertSequence => Some("revert"),
            CherryPick | CherryPickSequence => Some("cherry-pick"),
            Bisect => Some("bisect"),
            Rebase | RebaseInteractive | RebaseMerge => Some("rebase"),
            ApplyMailbox | ApplyMailboxOrRebase => Some("am"),
        };

        if let Some(label) = label {
            return Ok(Some(label.to_string()));
        }

        if self.repo.index().map_err(ShelfError::Git)?.has_conflicts() {
            return Ok(Some("conflict".to_string()));
        }

        Ok(None)
    }

    /// Check if the working directory is dirty (has uncommitted changes)
    pub fn is_dirty(&self) -> Result<bool> {
        let statuses = self.repo.statuses(None).map_err(ShelfError::Git)?;

        for status in statuses.iter() {
            let flags = status.status();

            if flags.intersects(
                git2::Status::INDEX_MODIFIED
                    | git2::Status::INDEX_NEW
                    | git2::Status::INDEX_DELETED
                    | git2::Status::WT_MODIFIED
                    | git2::Status::WT_NEW
                    | git2::Status::WT_DELETED,
            ) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Get list of untracked files
    pub fn untracked_files(&self) -> Result<Vec<String>> {
        let statuses = self.repo.statuses(None).map_err(ShelfError::Git)?;

        let mut untracked = Vec::new();
        for status in statuses.iter() {
            if status.status().contains(git2::Status::WT_NEW) {
                if let Some(path) = status.path() {
                    untracked.push(path.to_string());
                }
            }
        }

        Ok(untracked)
    }
}
