//! Watcher error types.

use std::path::PathBuf;

/// Errors that can occur during directory watching.
#[derive(thiserror::Error, Debug)]
pub enum WatcherError {
    /// Watch root does not exist.
    #[error("Watch path not found: {0}")]
    PathNotFound(PathBuf),

    /// Notify watcher error.
    #[error("File watcher error: {0}")]
    Notify(#[from] notify::Error),
}
