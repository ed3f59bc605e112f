use crate::config::{ensure_config_dir, get_config_dir};
use crate::errors::Result;
use crate::utils::atomic_file;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted user preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ask for confirmation before dropping a stash entry
    pub confirm_drop_stash: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            confirm_drop_stash: true,
        }
    }
}

impl Settings {
    /// Default on-disk location (~/.shelf/config.json)
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.json"))
    }

    /// Load settings from `path`, falling back to defaults when no file
    /// has been written yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist settings to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            ensure_config_dir(parent)?;
        }
        atomic_file::write_json(path, self)
    }
}
