//! Colored CLI display utilities.
//!
//! This module provides functions for printing colored, formatted output
//! to the terminal while autumn keeps the documentation up to date.

use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use owo_colors::OwoColorize;

/// Get current timestamp in the same format as tracing.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Print the startup banner.
pub fn print_banner(version: &str) {
    println!(
        "{} {}",
        "🍂 Autumn Documentation Generator".yellow().bold(),
        format!("v{version}").dimmed()
    );
    let _ = io::stdout().flush();
}

/// Print which project config is in use.
pub fn print_config_loaded(path: &Path) {
    println!(
        "{} {} {}",
        timestamp().dimmed(),
        "[CONFIG]".blue().bold(),
        path.display()
    );
    let _ = io::stdout().flush();
}

/// Print the location of a newly created project config.
pub fn print_project_created(path: &Path) {
    println!(
        "{} Created Autumn project configuration in {}",
        "[PROJECT]".green().bold(),
        path.display().cyan()
    );
    let _ = io::stdout().flush();
}

/// Print a written output file.
pub fn print_updated(path: &Path) {
    println!(
        "{} {} Documentation updated: {}",
        timestamp().dimmed(),
        "[UPDATED]".green().bold(),
        path.display().cyan()
    );
    let _ = io::stdout().flush();
}

/// Print a detected filesystem change.
pub fn print_change(kind: &str, relative_path: &Path) {
    println!(
        "{} {} {} detected: {}",
        timestamp().dimmed(),
        "🍂".yellow(),
        kind.bold(),
        relative_path.display()
    );
    let _ = io::stdout().flush();
}

/// Print that watching has started.
pub fn print_watching(path: &Path) {
    println!(
        "{} {} {} {}",
        timestamp().dimmed(),
        "[WATCH]".magenta().bold(),
        path.display(),
        "(Ctrl-C to stop)".dimmed()
    );
    let _ = io::stdout().flush();
}

/// Print that watching has stopped.
pub fn print_stopped() {
    println!("{} {}", timestamp().dimmed(), "[WATCH] stopped".magenta().bold());
    let _ = io::stdout().flush();
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
    let _ = io::stderr().flush();
}
