//! Runtime settings for a documentation run.

use std::path::{Path, PathBuf};

/// Extensions watched when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".jsx", ".ts", ".tsx", ".css", ".scss", ".html", ".java", ".cs", ".go", ".rs",
    ".php", ".sql",
];

/// Output file name used when none is given.
pub const DEFAULT_OUTPUT_FILE: &str = "CODE_DOCUMENTATION.md";

/// Directory holding project configuration and, by default, the output.
pub const CONFIG_DIR: &str = ".autumn";

/// Project configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "project.autumn";

/// Default extensions as owned strings.
#[must_use]
pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect()
}

/// Parse a comma-separated extension list.
///
/// Each item is trimmed of whitespace and surrounding dots, then given a
/// single leading dot. Empty items are dropped.
///
/// ```
/// use autumn::config::parse_extensions;
///
/// assert_eq!(parse_extensions("py, .js,,ts"), vec![".py", ".js", ".ts"]);
/// assert!(parse_extensions("").is_empty());
/// ```
#[must_use]
pub fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(|item| item.trim().trim_matches('.'))
        .filter(|item| !item.is_empty())
        .map(|item| format!(".{item}"))
        .collect()
}

/// Resolve where the combined output file should live.
///
/// An argument containing a path separator is used verbatim. A bare file
/// name goes into `<watch_path>/.autumn/` when that directory exists, and
/// directly into `watch_path` otherwise.
#[must_use]
pub fn resolve_output_path(output_arg: &str, watch_path: &Path) -> PathBuf {
    if output_arg.contains('/') || output_arg.contains('\\') {
        tracing::debug!(output = %output_arg, "Using provided output path");
        return PathBuf::from(output_arg);
    }

    let name = Path::new(output_arg)
        .file_name()
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE), PathBuf::from);

    let autumn_dir = watch_path.join(CONFIG_DIR);
    if autumn_dir.is_dir() {
        tracing::debug!(dir = %autumn_dir.display(), "Using .autumn directory for output");
        return autumn_dir.join(name);
    }

    tracing::debug!(dir = %watch_path.display(), "Using watch path for output");
    watch_path.join(name)
}

/// Fully resolved options for the documentation generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root of the tree to mirror. Absolute when it could be canonicalised.
    pub watch_path: PathBuf,
    /// Combined markdown output.
    pub output_file: PathBuf,
    /// Extensions to include, each with a leading dot.
    pub extensions: Vec<String>,
    /// Also write one file per extension next to the combined output.
    pub split_by_extension: bool,
}

impl Settings {
    /// Build settings, substituting the default extensions for an empty list.
    #[must_use]
    pub fn new(watch_path: &Path, output_file: PathBuf, extensions: Vec<String>) -> Self {
        let watch_path = watch_path
            .canonicalize()
            .unwrap_or_else(|_| watch_path.to_path_buf());
        let extensions = if extensions.is_empty() {
            default_extensions()
        } else {
            extensions
        };

        Self {
            watch_path,
            output_file,
            extensions,
            split_by_extension: false,
        }
    }

    /// Enable or disable per-extension output files.
    #[must_use]
    pub fn with_split(mut self, split: bool) -> Self {
        self.split_by_extension = split;
        self
    }
}
