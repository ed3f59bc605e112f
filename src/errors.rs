/// Shelf Error Types
#[derive(Debug, thiserror::Error)]
pub enum ShelfError {
    /// Git-related errors
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A git invocation exited with a non-zero status
    #[error("git {args} exited with code {exit_code}: {stderr}")]
    GitCommand {
        args: String,
        exit_code: i32,
        stderr: String,
    },

    /// Repository is not in a state where the operation is allowed
    /// (unborn, or mid-conflict/rebase)
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// No stash entry currently matches the requested sha; the entry may
    /// have been dropped concurrently
    #[error("No stash entry found for {0}")]
    StashNotFound(String),

    /// A file-change load failed and was rolled back for retry
    #[error("Failed to load stashed files: {0}")]
    FileLoad(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShelfError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ShelfError::Config(msg.into())
    }

    pub fn precondition<S: Into<String>>(msg: S) -> Self {
        ShelfError::Precondition(msg.into())
    }

    pub fn stash_not_found<S: Into<String>>(sha: S) -> Self {
        ShelfError::StashNotFound(sha.into())
    }

    pub fn file_load<S: Into<String>>(msg: S) -> Self {
        ShelfError::FileLoad(msg.into())
    }

    /// Whether the caller may meaningfully retry with fresh data
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ShelfError::StashNotFound(_) | ShelfError::FileLoad(_))
    }
}

pub type Result<T> = std::result::Result<T, ShelfError>;
