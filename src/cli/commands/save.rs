use super::manager_for_cwd;
use crate::cli::output::Output;
use crate::errors::Result;
use crate::utils::spinner::Spinner;

pub async fn run() -> Result<()> {
    let manager = manager_for_cwd()?;

    if !manager.repo().is_dirty()? {
        Output::info("Working directory is clean, nothing to stash");
        return Ok(());
    }

    let branch = manager.repo().current_branch()?;
    let tip = manager.repo().head_sha()?;

    let spinner = Spinner::new(format!("Stashing changes on '{branch}'..."));
    let result = manager.create_entry(&branch, &tip).await;
    spinner.stop();
    result?;

    match manager.last_entry_for_branch(&branch).await? {
        Some(entry) => Output::success(format!(
            "Stashed changes for '{}' ({})",
            branch,
            entry.short_sha()
        )),
        None => Output::success(format!("Stashed changes for '{branch}'")),
    }

    Ok(())
}
