//! File filtering for the documentation pipeline.
//!
//! Combines the project's `.gitignore` and `.docignore` with built-in
//! patterns and an extension allow-list.

mod rules;

pub use rules::{dotted_extension, is_ignore_file, IgnoreRules, IGNORE_FILES};
