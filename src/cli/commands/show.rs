use super::manager_for_cwd;
use crate::cli::output::Output;
use crate::errors::{Result, ShelfError};
use crate::git::FileStatus;
use console::style;

pub async fn run(sha: String) -> Result<()> {
    let manager = manager_for_cwd()?;

    let entry = manager
        .list_entries()
        .await?
        .into_iter()
        .find(|e| e.stash_sha.starts_with(&sha))
        .ok_or_else(|| ShelfError::stash_not_found(sha.as_str()))?;

    let files = manager.entry_files(&entry).await?;

    Output::section(format!(
        "Files in {} (branch '{}')",
        entry.short_sha(),
        entry.branch_name
    ));

    if files.is_empty() {
        Output::info("No file changes recorded");
        return Ok(());
    }

    for file in files.iter() {
        let letter = match file.status {
            FileStatus::Added => "A",
            FileStatus::Modified => "M",
            FileStatus::Deleted => "D",
            FileStatus::Renamed => "R",
            FileStatus::Copied => "C",
            FileStatus::TypeChanged => "T",
            FileStatus::Unmerged => "U",
        };
        println!("  {} {}", style(letter).cyan(), file.path);
    }

    Ok(())
}
