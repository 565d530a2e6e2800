//! Project initialisation (`--project`).

use std::path::{Path, PathBuf};

use crate::config::{
    default_extensions, parse_extensions, ConfigError, ProjectConfig, CONFIG_DIR,
    DEFAULT_OUTPUT_FILE,
};

/// Result of creating a project configuration.
#[derive(Debug)]
pub struct InitResult {
    /// Path to the written `project.autumn` file.
    pub config_path: PathBuf,
    /// Output file recorded in the config.
    pub output_file: PathBuf,
    /// Extensions recorded in the config.
    pub extensions: Vec<String>,
}

/// Create `.autumn/project.autumn` under `path`.
///
/// The output goes inside `.autumn/`, named after `output` when given
/// (only its file name is used). Extensions come from the comma-separated
/// `extensions` list, or the defaults.
///
/// # Errors
///
/// Returns an error if the config cannot be written.
pub fn init_project(
    path: &Path,
    output: Option<&str>,
    extensions: Option<&str>,
) -> Result<InitResult, ConfigError> {
    let name = output
        .and_then(|o| Path::new(o).file_name())
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE), PathBuf::from);
    let output_file = path.join(CONFIG_DIR).join(name);

    let extensions = extensions
        .map(parse_extensions)
        .filter(|exts| !exts.is_empty())
        .unwrap_or_else(default_extensions);

    let config_path = ProjectConfig::create(path, extensions.clone(), &output_file)?;
    tracing::info!(path = %config_path.display(), "Created project configuration");

    Ok(InitResult {
        config_path,
        output_file,
        extensions,
    })
}
