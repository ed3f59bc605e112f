use crate::errors::{Result, ShelfError};
use crate::git::process::run_git_checked;
use crate::git::{FileChange, GitRepository};
use crate::stash::entry::{StashEntry, StashedFileChanges};
use crate::stash::loader::StashFileLoader;
use crate::stash::message::{format_stash_message, parse_stash_message};
use chrono::DateTime;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Listing format: positional name, stash commit sha, commit time and
/// subject, tab-separated, one entry per line
const LIST_FORMAT: &str = "--format=%gd%x09%H%x09%ct%x09%gs";

/// Per-repository stash operations.
///
/// The native stash stack addresses entries positionally, is shared with
/// entries created outside the application, and may be mutated externally at
/// any time. Every mutation therefore re-resolves its target from a fresh
/// listing immediately before acting, and operations on one repository are
/// serialized: mutations hold the exclusive half of the lock across
/// resolve-then-act, listings share the read half. Repositories are
/// independent; there is no cross-repository lock.
pub struct StashManager {
    repo: GitRepository,
    stack_lock: RwLock<()>,
    loader: StashFileLoader,
}

impl StashManager {
    /// Create a new StashManager for the given repository
    pub fn new(repo_path: &Path) -> Result<Self> {
        let repo = GitRepository::open(repo_path)?;
        let loader = StashFileLoader::new(repo.path().to_path_buf());

        Ok(Self {
            repo,
            stack_lock: RwLock::new(()),
            loader,
        })
    }

    pub fn repo(&self) -> &GitRepository {
        &self.repo
    }

    /// List the application-created stash entries, most recent first.
    ///
    /// Foreign entries (anything whose message is not an application marker)
    /// are filtered out. An empty stack and an unborn repository both yield
    /// an empty list.
    pub async fn list_entries(&self) -> Result<Vec<StashEntry>> {
        let _guard = self.stack_lock.read().await;
        self.list_raw().await
    }

    /// Stash the working directory onto the stack, tagged for `branch_name`
    /// at `tip_sha`.
    ///
    /// The underlying primitive also clears the stashed changes, tracked and
    /// untracked, from the working directory.
    pub async fn create_entry(&self, branch_name: &str, tip_sha: &str) -> Result<()> {
        if self.repo.is_unborn() {
            return Err(ShelfError::precondition(
                "repository has no commits yet, there is nothing to stash onto",
            ));
        }
        if let Some(state) = self.repo.in_progress_state()? {
            return Err(ShelfError::precondition(format!(
                "repository has a {state} in progress"
            )));
        }

        let message = format_stash_message(branch_name, tip_sha);

        let _guard = self.stack_lock.write().await;
        run_git_checked(
            self.repo.path(),
            &["stash", "push", "--include-untracked", "-m", &message],
        )
        .await?;

        info!("created stash entry for {}@{}", branch_name, tip_sha);
        Ok(())
    }

    /// Apply an entry's changes onto the current working directory.
    ///
    /// Returns `StashNotFound` if no entry currently matches `stash_sha`;
    /// the target may have been dropped concurrently, so callers can retry
    /// with fresh data.
    pub async fn apply_entry(&self, stash_sha: &str) -> Result<()> {
        let _guard = self.stack_lock.write().await;
        self.apply_resolved(stash_sha).await
    }

    /// Remove an entry from the stack.
    ///
    /// Removing an entry that is already gone is success, not an error: the
    /// desired end state (entry absent) holds whether the stack is empty or
    /// the sha never matched.
    pub async fn drop_entry(&self, stash_sha: &str) -> Result<()> {
        let _guard = self.stack_lock.write().await;
        self.drop_resolved(stash_sha).await
    }

    /// Apply then remove an entry, in one serialized operation
    pub async fn pop_entry(&self, stash_sha: &str) -> Result<()> {
        let _guard = self.stack_lock.write().await;
        self.apply_resolved(stash_sha).await?;
        self.drop_resolved(stash_sha).await
    }

    /// The most recent entry created for `branch_name`, if any
    pub async fn last_entry_for_branch(&self, branch_name: &str) -> Result<Option<StashEntry>> {
        let entries = self.list_entries().await?;
        Ok(entries.into_iter().find(|e| e.branch_name == branch_name))
    }

    /// Resolve an entry's changed files, fetching them at most once
    pub async fn entry_files(&self, entry: &StashEntry) -> Result<Arc<Vec<FileChange>>> {
        self.loader.files(entry).await
    }

    /// Observe the loading state of an entry's file list
    pub fn file_state(&self, stash_sha: &str) -> StashedFileChanges {
        self.loader.state(stash_sha)
    }

    async fn list_raw(&self) -> Result<Vec<StashEntry>> {
        let output = run_git_checked(self.repo.path(), &["stash", "list", LIST_FORMAT]).await?;
        Ok(parse_stash_list(&output.stdout))
    }

    /// Resolve the volatile positional name from a fresh listing. An index
    /// cached across a suspension point may already belong to another entry.
    async fn find_by_sha(&self, stash_sha: &str) -> Result<Option<StashEntry>> {
        let entries = self.list_raw().await?;
        Ok(entries.into_iter().find(|e| e.stash_sha == stash_sha))
    }

    async fn apply_resolved(&self, stash_sha: &str) -> Result<()> {
        let entry = self
            .find_by_sha(stash_sha)
            .await?
            .ok_or_else(|| ShelfError::stash_not_found(stash_sha))?;

        run_git_checked(self.repo.path(), &["stash", "apply", &entry.name]).await?;
        info!("applied stash entry {} ({})", entry.name, entry.short_sha());
        Ok(())
    }

    async fn drop_resolved(&self, stash_sha: &str) -> Result<()> {
        match self.find_by_sha(stash_sha).await? {
            Some(entry) => {
                run_git_checked(self.repo.path(), &["stash", "drop", &entry.name]).await?;
                self.loader.invalidate(stash_sha);
                info!("dropped stash entry {} ({})", entry.name, entry.short_sha());
            }
            None => {
                debug!("no stash entry matches {}, nothing to drop", stash_sha);
            }
        }
        Ok(())
    }
}

/// Parse raw stash listing output into application entries, preserving
/// stack order (most recently pushed first). Malformed lines and foreign
/// entries are skipped, never fatal.
fn parse_stash_list(raw: &str) -> Vec<StashEntry> {
    let mut entries = Vec::new();

    for line in raw.lines() {
        if line.is_empty() {
            continue;
        }

        let mut fields = line.splitn(4, '\t');
        let (Some(name), Some(sha), Some(epoch), Some(subject)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            debug!("skipping malformed stash list line: {line}");
            continue;
        };

        let Ok(epoch) = epoch.parse::<i64>() else {
            debug!("skipping stash list line with bad timestamp: {line}");
            continue;
        };
        let Some(created_at) = DateTime::from_timestamp(epoch, 0) else {
            continue;
        };

        // Entries whose message fails to decode are foreign, not ours to
        // list or touch
        let Some(message) = parse_stash_message(subject) else {
            continue;
        };

        entries.push(StashEntry {
            name: name.to_string(),
            branch_name: message.branch_name,
            stash_sha: sha.to_string(),
            created_at,
        });
    }

    entries
}
