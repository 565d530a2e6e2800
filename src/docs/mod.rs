//! Markdown documentation pipeline.
//!
//! Enumerates matching source files under the watch root, groups them by
//! extension and renders them into one combined markdown file, optionally
//! with one extra file per extension.

mod collect;
mod error;
mod frontmatter;
mod generator;
mod render;

pub use collect::{collect_sources, SourceFile, SourceSet};
pub use error::GenerateError;
pub use frontmatter::{extract_frontmatter, Frontmatter};
pub use generator::DocGenerator;
pub use render::{
    render_combined, render_extension, split_output_path, timestamp, COMBINED_TITLE,
};
