use crate::errors::{Result, ShelfError};
use crate::git::{changed_files, FileChange};
use crate::stash::entry::{StashEntry, StashedFileChanges};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::debug;

/// Lazily materializes the changed-file lists of stash entries, keyed by
/// stash commit sha.
///
/// Each key moves NotLoaded -> Loading -> Loaded. A request arriving while a
/// load is in flight attaches to that load instead of issuing a second
/// fetch, and a failed load rolls the key back to NotLoaded so a later
/// request can retry. Loaded lists only leave the map through explicit
/// invalidation (the entry was dropped).
pub struct StashFileLoader {
    repo_path: PathBuf,
    states: Mutex<HashMap<String, LoadSlot>>,
}

enum LoadSlot {
    Loading(watch::Receiver<StashedFileChanges>),
    Loaded(Arc<Vec<FileChange>>),
}

enum Action {
    Fetch(watch::Sender<StashedFileChanges>),
    Wait(watch::Receiver<StashedFileChanges>),
    Done(Arc<Vec<FileChange>>),
}

impl StashFileLoader {
    pub fn new(repo_path: PathBuf) -> Self {
        Self {
            repo_path,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Current lifecycle state for a stash sha
    pub fn state(&self, stash_sha: &str) -> StashedFileChanges {
        let states = self.states.lock().unwrap();
        match states.get(stash_sha) {
            None => StashedFileChanges::NotLoaded,
            Some(LoadSlot::Loading(_)) => StashedFileChanges::Loading,
            Some(LoadSlot::Loaded(files)) => StashedFileChanges::Loaded(files.clone()),
        }
    }

    /// Resolve the file list for an entry, fetching it at most once
    pub async fn files(&self, entry: &StashEntry) -> Result<Arc<Vec<FileChange>>> {
        let action = {
            let mut states = self.states.lock().unwrap();
            match states.get(&entry.stash_sha) {
                Some(LoadSlot::Loaded(files)) => Action::Done(files.clone()),
                Some(LoadSlot::Loading(rx)) => Action::Wait(rx.clone()),
                None => {
                    let (tx, rx) = watch::channel(StashedFileChanges::Loading);
                    states.insert(entry.stash_sha.clone(), LoadSlot::Loading(rx));
                    Action::Fetch(tx)
                }
            }
        };

        match action {
            Action::Done(files) => Ok(files),
            Action::Wait(rx) => self.wait_for(entry, rx).await,
            Action::Fetch(tx) => self.fetch(entry, tx).await,
        }
    }

    /// Forget the state for a stash sha (the entry was dropped)
    pub fn invalidate(&self, stash_sha: &str) {
        self.states.lock().unwrap().remove(stash_sha);
    }

    async fn wait_for(
        &self,
        entry: &StashEntry,
        mut rx: watch::Receiver<StashedFileChanges>,
    ) -> Result<Arc<Vec<FileChange>>> {
        loop {
            if rx.changed().await.is_err() {
                return Err(ShelfError::file_load(format!(
                    "load for {} ended without a result",
                    entry.short_sha()
                )));
            }

            match &*rx.borrow() {
                StashedFileChanges::Loaded(files) => return Ok(files.clone()),
                StashedFileChanges::NotLoaded => {
                    return Err(ShelfError::file_load(format!(
                        "load for {} failed",
                        entry.short_sha()
                    )));
                }
                StashedFileChanges::Loading => continue,
            }
        }
    }

    async fn fetch(
        &self,
        entry: &StashEntry,
        tx: watch::Sender<StashedFileChanges>,
    ) -> Result<Arc<Vec<FileChange>>> {
        debug!("loading files for stash {}", entry.short_sha());
        let result = changed_files(&self.repo_path, &entry.stash_sha).await;

        let mut states = self.states.lock().unwrap();
        match result {
            Ok(files) => {
                let files = Arc::new(files);
                // Only record the result if the key was not invalidated
                // while the fetch was in flight
                if let Some(slot) = states.get_mut(&entry.stash_sha) {
                    if matches!(slot, LoadSlot::Loading(_)) {
                        *slot = LoadSlot::Loaded(files.clone());
                    }
                }
                let _ = tx.send(StashedFileChanges::Loaded(files.clone()));
                Ok(files)
            }
            Err(e) => {
                states.remove(&entry.stash_sha);
                let _ = tx.send(StashedFileChanges::NotLoaded);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(sha: &str) -> StashEntry {
        StashEntry {
            name: "stash@{0}".to_string(),
            branch_name: "master".to_string(),
            stash_sha: sha.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_state_defaults_to_not_loaded() {
        let loader = StashFileLoader::new(PathBuf::from("/nonexistent"));
        assert!(matches!(
            loader.state("abc123"),
            StashedFileChanges::NotLoaded
        ));
    }

    #[test]
    fn test_invalidate_unknown_key_is_a_noop() {
        let loader = StashFileLoader::new(PathBuf::from("/nonexistent"));
        loader.invalidate("abc123");
        assert!(matches!(
            loader.state("abc123"),
            StashedFileChanges::NotLoaded
        ));
    }

    #[tokio::test]
    async fn test_failed_load_reverts_to_not_loaded() {
        let tmp = tempfile::TempDir::new().unwrap();
        let loader = StashFileLoader::new(tmp.path().to_path_buf());
        let entry = entry("0000000000000000000000000000000000000000");

        let result = loader.files(&entry).await;

        assert!(result.is_err());
        assert!(matches!(
            loader.state(&entry.stash_sha),
            StashedFileChanges::NotLoaded
        ));
    }
}
