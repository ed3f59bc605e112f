use super::manager_for_cwd;
use crate::cli::output::Output;
use crate::errors::Result;

pub async fn run(json: bool) -> Result<()> {
    let manager = manager_for_cwd()?;
    let entries = manager.list_entries().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        Output::info("No stash entries. Create one with: shelf save");
        return Ok(());
    }

    Output::section("Stash entries");
    for entry in &entries {
        Output::bullet(format!(
            "{} {} ({}, {})",
            entry.short_sha(),
            entry.branch_name,
            entry.name,
            entry.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }
    Output::tip("Use 'shelf show <sha>' to see the files in an entry");

    Ok(())
}
