pub mod settings;

pub use settings::Settings;

use crate::errors::{Result, ShelfError};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the Shelf configuration directory (~/.shelf/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| ShelfError::config("Could not find home directory"))?;
    Ok(home_dir.join(".shelf"))
}

/// Ensure the configuration directory exists
pub fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        fs::create_dir_all(config_dir).map_err(|e| {
            ShelfError::config(format!("Failed to create config directory: {}", e))
        })?;
    }
    Ok(())
}
