use crate::errors::{Result, ShelfError};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub mod spinner;

/// Atomic file operations to prevent corruption during writes
pub mod atomic_file {
    use super::*;

    /// Write JSON data to a file atomically using a temporary file + rename
    /// strategy
    pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(data)
            .map_err(|e| ShelfError::config(format!("Failed to serialize data: {e}")))?;
        write_string(path, &content)
    }

    /// Write string content to a file atomically using a temporary file +
    /// rename strategy
    pub fn write_string(path: &Path, content: &str) -> Result<()> {
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
