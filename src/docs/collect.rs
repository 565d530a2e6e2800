//! Source enumeration and grouping.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::GenerateError;
use super::frontmatter::{extract_frontmatter, Frontmatter};
use crate::filter::{dotted_extension, IgnoreRules};

/// A source file selected for the documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Path relative to the watch root.
    pub relative_path: PathBuf,
    /// Extension with leading dot.
    pub extension: String,
    /// Content with any frontmatter removed.
    pub content: String,
    /// Frontmatter parsed from the head of the file.
    pub frontmatter: Option<Frontmatter>,
}

/// Selected files grouped by extension, both levels in sorted order.
pub type SourceSet = BTreeMap<String, Vec<SourceFile>>;

/// Walk `root` and collect every file the rules accept.
///
/// Ignored directories are not descended into, nor are symlinked
/// directories; symlinks to files are collected under the link's path.
/// Files that cannot be read as UTF-8 are logged and skipped.
///
/// # Errors
///
/// Returns an error if the root itself cannot be walked.
pub fn collect_sources(
    root: &Path,
    rules: &IgnoreRules,
    extensions: &[String],
) -> Result<SourceSet, GenerateError> {
    if !root.is_dir() {
        return Err(GenerateError::MissingRoot(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            entry
                .path()
                .strip_prefix(root)
                .map_or(true, |rel| !rules.is_ignored(rel, true))
        });

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(GenerateError::Walk {
                    path: root.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && rules.should_process(entry.path(), extensions) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    let mut sources = SourceSet::new();
    for path in paths {
        let Some(source) = read_source(root, path) else {
            continue;
        };
        sources
            .entry(source.extension.clone())
            .or_default()
            .push(source);
    }

    tracing::debug!(
        root = %root.display(),
        files = sources.values().map(Vec::len).sum::<usize>(),
        extensions = sources.len(),
        "Collected sources"
    );
    Ok(sources)
}

fn read_source(root: &Path, path: PathBuf) -> Option<SourceFile> {
    let extension = dotted_extension(&path)?;
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Skipping file that could not be read as UTF-8");
            return None;
        }
    };

    let (frontmatter, body) = extract_frontmatter(&raw);
    let content = body.to_string();
    let relative_path = path.strip_prefix(root).unwrap_or(&path).to_path_buf();

    Some(SourceFile {
        path,
        relative_path,
        extension,
        content,
        frontmatter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        (dir, root)
    }

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_groups_by_extension_in_path_order() {
        let (_dir, root) = setup();
        write(&root, "b.py", b"b");
        write(&root, "a/z.py", b"az");
        write(&root, "a.py", b"a");
        write(&root, "lib.rs", b"rs");
        write(&root, "README.md", b"skip");

        let rules = IgnoreRules::load(&root, &root.join("OUT.md"));
        let exts = vec![".py".to_string(), ".rs".to_string()];
        let sources = collect_sources(&root, &rules, &exts).unwrap();

        assert_eq!(sources.keys().collect::<Vec<_>>(), vec![".py", ".rs"]);
        let py: Vec<_> = sources[".py"]
            .iter()
            .map(|s| s.relative_path.to_string_lossy().into_owned())
            .collect();
        assert_eq!(py, vec!["a/z.py", "a.py", "b.py"]);
        assert_eq!(sources[".rs"][0].content, "rs");
        assert!(sources[".rs"][0].path.is_absolute());
    }

    #[test]
    fn test_skips_ignored_directories_and_files() {
        let (_dir, root) = setup();
        write(&root, ".gitignore", b"build/\n");
        write(&root, ".docignore", b"secret.py\n");
        write(&root, "build/gen.py", b"x");
        write(&root, "node_modules/m/index.js", b"x");
        write(&root, "secret.py", b"x");
        write(&root, "app.py", b"ok");

        let rules = IgnoreRules::load(&root, &root.join("OUT.md"));
        let exts = vec![".py".to_string(), ".js".to_string()];
        let sources = collect_sources(&root, &rules, &exts).unwrap();

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[".py"].len(), 1);
        assert_eq!(sources[".py"][0].relative_path, PathBuf::from("app.py"));
    }

    #[test]
    fn test_skips_non_utf8_files() {
        let (_dir, root) = setup();
        write(&root, "bad.py", &[0xff, 0xfe, 0x00]);
        write(&root, "good.py", b"print(1)");

        let rules = IgnoreRules::load(&root, &root.join("OUT.md"));
        let sources = collect_sources(&root, &rules, &[".py".to_string()]).unwrap();

        assert_eq!(sources[".py"].len(), 1);
        assert_eq!(sources[".py"][0].content, "print(1)");
    }

    #[test]
    fn test_strips_frontmatter() {
        let (_dir, root) = setup();
        write(&root, "doc.py", b"---\nauthor: me\n---\nprint(1)\n");

        let rules = IgnoreRules::load(&root, &root.join("OUT.md"));
        let sources = collect_sources(&root, &rules, &[".py".to_string()]).unwrap();

        let file = &sources[".py"][0];
        assert_eq!(file.content, "print(1)\n");
        assert_eq!(file.frontmatter.as_ref().unwrap().to_yaml(), "author: me\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_follows_file_symlinks_only() {
        let (_dir, root) = setup();
        let (_other, elsewhere) = setup();
        write(&elsewhere, "real.py", b"real = 1");
        write(&elsewhere, "pkg/inner.py", b"inner = 1");
        std::os::unix::fs::symlink(elsewhere.join("real.py"), root.join("link.py")).unwrap();
        std::os::unix::fs::symlink(elsewhere.join("pkg"), root.join("pkg")).unwrap();

        let rules = IgnoreRules::load(&root, &root.join("OUT.md"));
        let sources = collect_sources(&root, &rules, &[".py".to_string()]).unwrap();

        assert_eq!(sources[".py"].len(), 1);
        let file = &sources[".py"][0];
        assert_eq!(file.relative_path, PathBuf::from("link.py"));
        assert_eq!(file.path, root.join("link.py"));
        assert_eq!(file.content, "real = 1");
    }

    #[test]
    fn test_missing_root_is_error() {
        let (_dir, root) = setup();
        let missing = root.join("nope");
        let rules = IgnoreRules::load(&missing, &missing.join("OUT.md"));

        let err = collect_sources(&missing, &rules, &[".py".to_string()]).unwrap_err();
        assert!(matches!(err, GenerateError::MissingRoot(_)));
    }
}
