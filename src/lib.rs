//! Autumn - keep an AI-friendly markdown mirror of a project's source code.

pub mod commands;
pub mod config;
pub mod display;
pub mod docs;
pub mod filter;
pub mod watcher;
