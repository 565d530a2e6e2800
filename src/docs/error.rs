//! Documentation generation error types.

use std::path::PathBuf;

/// Errors that can occur while generating documentation.
#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    /// Watch root does not exist or is not a directory.
    #[error("Watch path is not a directory: {0}")]
    MissingRoot(PathBuf),

    /// Directory traversal failed.
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// Output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Output file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root_display() {
        let err = GenerateError::MissingRoot(PathBuf::from("/tmp/gone"));
        assert_eq!(err.to_string(), "Watch path is not a directory: /tmp/gone");
    }

    #[test]
    fn test_write_display() {
        let err = GenerateError::Write {
            path: PathBuf::from("/ro/out.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to write /ro/out.md: denied");
    }
}
