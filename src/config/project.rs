//! Project configuration file (`.autumn/project.autumn`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::settings::{resolve_output_path, CONFIG_DIR, CONFIG_FILE, DEFAULT_OUTPUT_FILE};

/// On-disk shape of the project file. Paths are relative to the project base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct ProjectFile {
    extensions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    watch_path: Option<String>,
}

/// Project configuration with paths resolved against the project base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Extensions to include. Empty means the built-in defaults.
    pub extensions: Vec<String>,
    /// Combined output file.
    pub output_file: PathBuf,
    /// Directory tree to mirror.
    pub watch_path: PathBuf,
}

impl ProjectConfig {
    /// Search `start` and each of its ancestors for `.autumn/project.autumn`.
    ///
    /// Returns the first config file found, closest to `start`.
    #[must_use]
    pub fn find(start: &Path) -> Option<PathBuf> {
        let start = std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf());

        let found = start
            .ancestors()
            .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
            .find(|candidate| candidate.is_file());

        match &found {
            Some(path) => tracing::debug!(path = %path.display(), "Found project config"),
            None => tracing::debug!(start = %start.display(), "No project config found"),
        }
        found
    }

    /// Load a project config, resolving paths against the directory that
    /// contains `.autumn/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %config_path.display(), "Loading project config");

        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;

        let file: ProjectFile = if content.trim().is_empty() {
            ProjectFile::default()
        } else {
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: config_path.to_path_buf(),
                source,
            })?
        };

        let base = Self::base_dir(config_path);
        Ok(Self::from_file(file, &base))
    }

    /// Write a project config under `<base>/.autumn/`, storing paths
    /// relative to `base` where possible.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, base: &Path) -> Result<PathBuf, ConfigError> {
        let config_dir = base.join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.clone(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let file = ProjectFile {
            extensions: self.extensions.clone(),
            output_file: Some(relative_to(&self.output_file, base)),
            watch_path: Some(relative_to(&self.watch_path, base)),
        };

        let yaml = serde_yaml::to_string(&file).map_err(|source| ConfigError::Serialize {
            path: config_path.clone(),
            source,
        })?;
        std::fs::write(&config_path, yaml).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;

        tracing::info!(path = %config_path.display(), "Saved project config");
        Ok(config_path)
    }

    /// Create a new project config for `path`, watching `path` itself.
    ///
    /// Returns the path of the written config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the paths cannot be made absolute or the file
    /// cannot be written.
    pub fn create(
        path: &Path,
        extensions: Vec<String>,
        output_file: &Path,
    ) -> Result<PathBuf, ConfigError> {
        let absolute = |p: &Path| {
            std::path::absolute(p).map_err(|source| ConfigError::Resolve {
                path: p.to_path_buf(),
                source,
            })
        };
        let base = absolute(path)?;

        let config = Self {
            extensions,
            output_file: absolute(output_file)?,
            watch_path: base.clone(),
        };
        config.save(&base)
    }

    fn from_file(file: ProjectFile, base: &Path) -> Self {
        let watch_path = match file.watch_path.as_deref() {
            None | Some("." | "") => base.to_path_buf(),
            Some(rel) => base.join(rel),
        };
        let output_arg = file.output_file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE);

        let mut output_file = resolve_output_path(output_arg, &watch_path);
        if output_file.is_relative() {
            output_file = base.join(output_file);
        }

        Self {
            extensions: file.extensions,
            output_file,
            watch_path,
        }
    }

    fn base_dir(config_path: &Path) -> PathBuf {
        config_path
            .parent()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }
}

/// Render `path` relative to `base`, or verbatim when it lies elsewhere.
fn relative_to(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

/// Errors that can occur while reading or writing project configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to resolve path {path}: {source}")]
    Resolve {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize config for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
