//! Watcher module for the project tree.
//!
//! Bridges debounced filesystem events into a loop that keeps the
//! documentation current.

mod error;
mod project_watcher;
mod runner;

pub use error::WatcherError;
pub use project_watcher::{ChangeKind, PathChange, ProjectWatcher, WatchEvent, DEFAULT_DEBOUNCE};
pub use runner::{BatchPlan, WatchLoop, WatchOutcome};
