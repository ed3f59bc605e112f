use crate::errors::Result;
use crate::git::process::{run_git, run_git_checked};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// How a file changed within a commit-like reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    TypeChanged,
    Unmerged,
}

impl FileStatus {
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(FileStatus::Added),
            'M' => Some(FileStatus::Modified),
            'D' => Some(FileStatus::Deleted),
            'R' => Some(FileStatus::Renamed),
            'C' => Some(FileStatus::Copied),
            'T' => Some(FileStatus::TypeChanged),
            'U' => Some(FileStatus::Unmerged),
            _ => None,
        }
    }
}

/// A single changed file belonging to a commit-like reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub status: FileStatus,
}

/// List the files changed by a commit-like reference, relative to its first
/// parent.
///
/// Stash commits record untracked files in a third parent commit; when that
/// parent exists its tree is folded in as additions, so the result covers
/// both tracked modifications and untracked files.
pub async fn changed_files(repo_path: &Path, reference: &str) -> Result<Vec<FileChange>> {
    let parent = format!("{reference}^");
    let output = run_git_checked(
        repo_path,
        &["diff-tree", "--name-status", "-z", "-r", &parent, reference],
    )
    .await?;

    let mut files = parse_name_status(&output.stdout);

    // Untracked files, if the reference is a stash commit that carried any
    let untracked_tree = format!("{reference}^3");
    let untracked = run_git(
        repo_path,
        &["ls-tree", "-r", "-z", "--name-only", &untracked_tree],
    )
    .await?;
    if untracked.success() {
        for path in untracked.stdout.split('\0') {
            if !path.is_empty() {
                files.push(FileChange {
                    path: path.to_string(),
                    status: FileStatus::Added,
                });
            }
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!("{} file(s) changed in {}", files.len(), reference);
    Ok(files)
}

/// Parse `--name-status -z` output: NUL-separated records of a status token
/// followed by one path, or two paths for renames and copies. Malformed
/// records are skipped.
fn parse_name_status(raw: &str) -> Vec<FileChange> {
    let mut files = Vec::new();
    let mut tokens = raw.split('\0');

    while let Some(token) = tokens.next() {
        if token.is_empty() {
            continue;
        }

        let Some(status) = token.chars().next().and_then(FileStatus::from_letter) else {
            continue;
        };

        let Some(path) = tokens.next() else {
            break;
        };

        // Renames and copies carry source then destination; report the
        // destination path
        let path = if matches!(status, FileStatus::Renamed | FileStatus::Copied) {
            match tokens.next() {
                Some(destination) => destination,
                None => break,
            }
        } else {
            path
        };

        if path.is_empty() {
            continue;
        }

        files.push(FileChange {
            path: path.to_string(),
            status,
        });
    }

    files
}
