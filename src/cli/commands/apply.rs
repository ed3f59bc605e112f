use super::manager_for_cwd;
use crate::cli::output::Output;
use crate::errors::{Result, ShelfError};
use crate::utils::spinner::Spinner;

pub async fn run(sha: Option<String>, pop: bool) -> Result<()> {
    let manager = manager_for_cwd()?;

    let sha = match sha {
        Some(sha) => sha,
        None => {
            let branch = manager.repo().current_branch()?;
            match manager.last_entry_for_branch(&branch).await? {
                Some(entry) => entry.stash_sha,
                None => {
                    Output::warning(format!("No stash entry for branch '{branch}'"));
                    return Ok(());
                }
            }
        }
    };

    let spinner = Spinner::new("Restoring stashed changes...".to_string());
    let result = if pop {
        manager.pop_entry(&sha).await
    } else {
        manager.apply_entry(&sha).await
    };
    spinner.stop();

    match result {
        Ok(()) => {
            if pop {
                Output::success("Applied and dropped stash entry");
            } else {
                Output::success("Applied stash entry");
            }
            Ok(())
        }
        Err(e @ ShelfError::StashNotFound(_)) => {
            Output::tip("The entry may have been dropped elsewhere; run 'shelf list' to refresh");
            Err(e)
        }
        Err(e) => Err(e),
    }
}
