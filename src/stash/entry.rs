use crate::git::FileChange;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One application-created entry in the repository's stash stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StashEntry {
    /// Positional stack reference (e.g. `stash@{0}`). Shifts whenever other
    /// entries are pushed or popped; never carry it across calls.
    pub name: String,
    /// Branch the entry was created on
    pub branch_name: String,
    /// Sha of the stash commit. Stable; the durable identity for
    /// cross-call correlation.
    pub stash_sha: String,
    /// When the entry was pushed onto the stack
    pub created_at: DateTime<Utc>,
}

impl StashEntry {
    /// Get a short version of the stash commit sha
    pub fn short_sha(&self) -> &str {
        let len = self.stash_sha.len().min(8);
        &self.stash_sha[..len]
    }
}

/// Loading lifecycle of an entry's changed-file list, keyed by stash sha
#[derive(Debug, Clone, Default)]
pub enum StashedFileChanges {
    /// No one has asked for the files yet
    #[default]
    NotLoaded,
    /// A fetch is in flight; further requests attach to it
    Loading,
    /// The resolved, ordered file list
    Loaded(Arc<Vec<FileChange>>),
}

impl StashedFileChanges {
    pub fn is_loaded(&self) -> bool {
        matches!(self, StashedFileChanges::Loaded(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, StashedFileChanges::Loading)
    }
}
