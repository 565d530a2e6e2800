//! Markdown rendering of collected sources.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::Local;

use super::collect::{SourceFile, SourceSet};

/// Title of the combined document.
pub const COMBINED_TITLE: &str = "# Project Source Code Context";

const MAINTAINED_NOTE: &str = "*This file is automatically maintained by Autumn.*";

/// Local time in the format stamped into generated files.
#[must_use]
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Render every collected file into one document, extensions ascending.
#[must_use]
pub fn render_combined(sources: &SourceSet, timestamp: &str) -> String {
    let mut out = header(COMBINED_TITLE, timestamp);
    for files in sources.values() {
        for file in files {
            push_file(&mut out, file);
        }
    }
    out
}

/// Render the files of a single extension, titled after it.
#[must_use]
pub fn render_extension(extension: &str, files: &[SourceFile], timestamp: &str) -> String {
    let title = format!("# {} Files", lang(extension).to_uppercase());
    let mut out = header(&title, timestamp);
    for file in files {
        push_file(&mut out, file);
    }
    out
}

/// Path of the per-extension file for `output_file`:
/// `<dir>/<stem>_<ext>.md`.
#[must_use]
pub fn split_output_path(output_file: &Path, extension: &str) -> PathBuf {
    let stem = output_file
        .file_stem()
        .map_or_else(
            || "CODE_DOCUMENTATION".to_string(),
            |s| s.to_string_lossy().into_owned(),
        );
    let name = format!("{stem}_{}.md", lang(extension));
    match output_file.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn lang(extension: &str) -> &str {
    extension.strip_prefix('.').unwrap_or(extension)
}

fn header(title: &str, timestamp: &str) -> String {
    format!("{title}\n*Last updated: {timestamp}*\n\n{MAINTAINED_NOTE}\n\n")
}

fn push_file(out: &mut String, file: &SourceFile) {
    let _ = write!(out, "## {}\n\n", file.path.display());
    if let Some(frontmatter) = &file.frontmatter {
        let _ = write!(out, "### Metadata\n\n```yaml\n{}```\n\n", frontmatter.to_yaml());
    }
    let _ = write!(
        out,
        "```{}\n{}\n```\n\n",
        lang(&file.extension),
        file.content
    );
}
