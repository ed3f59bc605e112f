use super::manager_for_cwd;
use crate::cli::output::Output;
use crate::config::Settings;
use crate::errors::{Result, ShelfError};
use dialoguer::Confirm;

pub async fn run(sha: String, yes: bool) -> Result<()> {
    let manager = manager_for_cwd()?;

    let settings = Settings::load(&Settings::default_path()?)?;
    if settings.confirm_drop_stash && !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Drop stash entry {sha}?"))
            .default(false)
            .interact()
            .map_err(|e| ShelfError::config(format!("Confirmation prompt failed: {e}")))?;

        if !confirmed {
            Output::info("Aborted");
            return Ok(());
        }
    }

    manager.drop_entry(&sha).await?;
    Output::success(format!("Stash entry {sha} removed"));

    Ok(())
}
