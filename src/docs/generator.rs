//! Documentation generator tying collection, rendering and output together.

use std::path::{Path, PathBuf};

use super::collect::{collect_sources, SourceSet};
use super::error::GenerateError;
use super::render::{render_combined, render_extension, split_output_path, timestamp};
use crate::config::Settings;
use crate::display;
use crate::filter::IgnoreRules;

/// Keeps the markdown mirror of a directory tree up to date.
#[derive(Debug)]
pub struct DocGenerator {
    settings: Settings,
    rules: IgnoreRules,
}

impl DocGenerator {
    /// Create a generator, making sure the output directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created.
    pub fn new(settings: Settings) -> Result<Self, GenerateError> {
        if let Some(parent) = settings.output_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| GenerateError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let rules = IgnoreRules::load(&settings.watch_path, &settings.output_file);
        tracing::debug!(
            watch_path = %settings.watch_path.display(),
            output = %settings.output_file.display(),
            patterns = rules.pattern_count(),
            "Created documentation generator"
        );

        Ok(Self { settings, rules })
    }

    /// Settings in use.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Currently loaded ignore rules.
    #[must_use]
    pub fn rules(&self) -> &IgnoreRules {
        &self.rules
    }

    /// Re-read `.gitignore` and `.docignore` from the watch root.
    pub fn reload_ignore_rules(&mut self) {
        self.rules = IgnoreRules::load(&self.settings.watch_path, &self.settings.output_file);
        tracing::info!(patterns = self.rules.pattern_count(), "Reloaded ignore rules");
    }

    /// Collect the current sources without writing anything.
    ///
    /// The generator's own outputs, split files included, are never
    /// collected.
    ///
    /// # Errors
    ///
    /// Returns an error if the watch root cannot be walked.
    pub fn collect(&self) -> Result<SourceSet, GenerateError> {
        let mut sources = collect_sources(
            &self.settings.watch_path,
            &self.rules,
            &self.settings.extensions,
        )?;
        for files in sources.values_mut() {
            files.retain(|file| !self.is_generated_output(&file.path));
        }
        sources.retain(|_, files| !files.is_empty());
        Ok(sources)
    }

    /// Regenerate the combined document, plus one document per extension
    /// in split mode. Returns the paths written.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be walked or an output cannot be
    /// written. Outputs written before the failure are left in place.
    pub fn update_documentation(&self) -> Result<Vec<PathBuf>, GenerateError> {
        let sources = self.collect()?;
        let stamp = timestamp();
        let mut written = Vec::with_capacity(1 + sources.len());

        let combined = render_combined(&sources, &stamp);
        write_output(&self.settings.output_file, &combined)?;
        written.push(self.settings.output_file.clone());

        if self.settings.split_by_extension {
            for (extension, files) in &sources {
                let path = split_output_path(&self.settings.output_file, extension);
                write_output(&path, &render_extension(extension, files, &stamp))?;
                written.push(path);
            }
        }

        tracing::info!(
            files = sources.values().map(Vec::len).sum::<usize>(),
            outputs = written.len(),
            "Documentation updated"
        );
        Ok(written)
    }

    /// Check whether `path` is one of this generator's own outputs.
    ///
    /// Matches by file name: the combined output, or a `<stem>_<ext>.md`
    /// file for any watched extension.
    #[must_use]
    pub fn is_generated_output(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let output = &self.settings.output_file;
        if output.file_name().and_then(|n| n.to_str()) == Some(name) {
            return true;
        }

        self.settings.extensions.iter().any(|ext| {
            split_output_path(output, ext)
                .file_name()
                .and_then(|n| n.to_str())
                == Some(name)
        })
    }
}

fn write_output(path: &Path, content: &str) -> Result<(), GenerateError> {
    std::fs::write(path, content).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    display::print_updated(path);
    Ok(())
}
