//! Gitignore-style rules deciding which files are mirrored.

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Ignore files read from the watch root, in load order.
pub const IGNORE_FILES: &[&str] = &[".gitignore", ".docignore"];

/// Patterns always applied after the user's ignore files.
const DEFAULT_PATTERNS: &[&str] = &[
    ".git/",
    "__pycache__/",
    "*.pyc",
    "node_modules/",
    "venv/",
    ".env",
    ".autumn/",
];

/// Compiled ignore rules rooted at the watch path.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    root: PathBuf,
    matcher: Gitignore,
    pattern_count: usize,
}

impl IgnoreRules {
    /// Load `.gitignore` and `.docignore` from `root`, then append the
    /// built-in patterns and the output file's name.
    ///
    /// Missing ignore files are skipped. Lines that are not valid patterns
    /// are logged and dropped.
    #[must_use]
    pub fn load(root: &Path, output_file: &Path) -> Self {
        let mut lines = Vec::new();

        for name in IGNORE_FILES {
            let path = root.join(name);
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    tracing::debug!(path = %path.display(), "Loaded ignore file");
                    lines.extend(content.lines().map(str::to_string));
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read ignore file");
                }
            }
        }

        lines.extend(DEFAULT_PATTERNS.iter().map(|p| (*p).to_string()));
        if let Some(name) = output_file.file_name() {
            lines.push(name.to_string_lossy().into_owned());
        }

        Self::from_lines(root, &lines)
    }

    /// Compile rules from explicit pattern lines.
    #[must_use]
    pub fn from_lines<S: AsRef<str>>(root: &Path, lines: &[S]) -> Self {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for line in lines {
            let line = line.as_ref();
            match builder.add_line(None, line) {
                Ok(_) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() && !trimmed.starts_with('#') {
                        pattern_count += 1;
                    }
                }
                Err(e) => tracing::warn!(pattern = %line, error = %e, "Skipping invalid ignore pattern"),
            }
        }

        let matcher = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to compile ignore rules, ignoring nothing");
            Gitignore::empty()
        });

        Self {
            root: root.to_path_buf(),
            matcher,
            pattern_count,
        }
    }

    /// Number of patterns compiled into the matcher.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Check whether a path relative to the root, or any of its parent
    /// directories, is ignored.
    #[must_use]
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        if relative.as_os_str().is_empty() || relative.has_root() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }

    /// Decide whether `path` should be mirrored: it must be a regular file
    /// under the root, not ignored, with one of the given extensions.
    #[must_use]
    pub fn should_process(&self, path: &Path, extensions: &[String]) -> bool {
        if !path.is_file() {
            return false;
        }
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        if self.is_ignored(relative, false) {
            return false;
        }
        dotted_extension(path).is_some_and(|ext| extensions.iter().any(|e| *e == ext))
    }
}

/// Extension with a leading dot, e.g. `.rs`. Dotfiles such as `.gitignore`
/// have none.
#[must_use]
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

/// Check whether a path names one of the ignore files.
#[must_use]
pub fn is_ignore_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| IGNORE_FILES.contains(&name))
}
