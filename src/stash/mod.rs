pub mod entry;
pub mod loader;
pub mod manager;
pub mod message;

pub use entry::{StashEntry, StashedFileChanges};
pub use loader::StashFileLoader;
pub use manager::StashManager;
pub use message::{format_stash_message, parse_stash_message, StashMessage, STASH_ENTRY_MARKER};
