//! Resolution of CLI options and project config into generator settings.

use std::path::PathBuf;

use crate::config::{
    parse_extensions, resolve_output_path, ConfigError, ProjectConfig, Settings,
    DEFAULT_OUTPUT_FILE,
};

/// Options as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Directory to watch.
    pub path: PathBuf,
    /// Output file argument (`-o`).
    pub output: Option<String>,
    /// Comma-separated extension list (`-e`).
    pub extensions: Option<String>,
    /// Write per-extension files too.
    pub split: bool,
}

impl RunOptions {
    /// Options for `path` with everything else defaulted.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    fn parsed_extensions(&self) -> Option<Vec<String>> {
        self.extensions
            .as_deref()
            .map(parse_extensions)
            .filter(|exts| !exts.is_empty())
    }
}

/// Settings together with the project config they came from, if any.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub settings: Settings,
    pub config_path: Option<PathBuf>,
}

/// Combine CLI options with the nearest project config.
///
/// A project config found at or above `options.path` supplies the watch
/// path, output and extensions; explicit `--output` and `--extensions`
/// override it. Without a config, the output is resolved against the watch
/// path and extensions fall back to the defaults.
///
/// # Errors
///
/// Returns an error if a project config exists but cannot be loaded.
pub fn resolve_settings(options: &RunOptions) -> Result<ResolvedSettings, ConfigError> {
    let config_path = ProjectConfig::find(&options.path);

    let (watch_path, output_file, extensions) = match &config_path {
        Some(path) => {
            let config = ProjectConfig::load(path)?;
            let output_file = match &options.output {
                Some(arg) => resolve_output_path(arg, &config.watch_path),
                None => config.output_file,
            };
            let extensions = options.parsed_extensions().unwrap_or(config.extensions);
            (config.watch_path, output_file, extensions)
        }
        None => {
            let arg = options.output.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE);
            let output_file = resolve_output_path(arg, &options.path);
            let extensions = options.parsed_extensions().unwrap_or_default();
            (options.path.clone(), output_file, extensions)
        }
    };

    let settings = Settings::new(&watch_path, output_file, extensions).with_split(options.split);
    tracing::debug!(
        watch_path = %settings.watch_path.display(),
        output = %settings.output_file.display(),
        extensions = ?settings.extensions,
        split = settings.split_by_extension,
        config = ?config_path,
        "Resolved settings"
    );

    Ok(ResolvedSettings {
        settings,
        config_path,
    })
}
