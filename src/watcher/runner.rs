//! Watch loop that regenerates documentation on relevant changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::error::WatcherError;
use super::project_watcher::{PathChange, ProjectWatcher, WatchEvent};
use crate::display;
use crate::docs::{DocGenerator, GenerateError};
use crate::filter::is_ignore_file;

/// How a watch loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Stopped via the cancellation token.
    Cancelled,
    /// The watcher's event channel closed.
    ChannelClosed,
}

/// What to do with one batch of changes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchPlan {
    /// Changes that warrant a regeneration, in batch order.
    pub relevant: Vec<PathChange>,
    /// A root ignore file changed, so rules must be reloaded first.
    pub reload_rules: bool,
}

impl BatchPlan {
    /// Whether the batch requires regenerating the documentation.
    #[must_use]
    pub fn needs_update(&self) -> bool {
        !self.relevant.is_empty()
    }
}

/// Drives a [`DocGenerator`] from filesystem events.
#[derive(Debug)]
pub struct WatchLoop {
    generator: DocGenerator,
    debounce: Duration,
}

impl WatchLoop {
    /// Create a watch loop around an already configured generator.
    #[must_use]
    pub fn new(generator: DocGenerator, debounce: Duration) -> Self {
        Self {
            generator,
            debounce,
        }
    }

    /// Generator driven by this loop.
    #[must_use]
    pub fn generator(&self) -> &DocGenerator {
        &self.generator
    }

    /// Classify a batch of changes.
    ///
    /// Generated outputs and directories are skipped. A root-level
    /// `.gitignore` or `.docignore` is always relevant and triggers a rule
    /// reload; any other path is relevant unless the current rules ignore
    /// it. Ignore rules are consulted before the reload, so a path newly
    /// excluded by the same batch still counts once.
    #[must_use]
    pub fn plan_batch(&self, changes: &[PathChange]) -> BatchPlan {
        let root = &self.generator.settings().watch_path;
        let mut plan = BatchPlan::default();

        for change in changes {
            let path = change.path.as_path();
            if self.generator.is_generated_output(path) || path.is_dir() {
                continue;
            }
            let Some(relative) = relative_to_root(path, root) else {
                continue;
            };

            if is_ignore_file(path) && relative.parent() == Some(Path::new("")) {
                plan.reload_rules = true;
                plan.relevant.push(change.clone());
            } else if !self.generator.rules().is_ignored(relative, false) {
                plan.relevant.push(change.clone());
            }
        }

        plan
    }

    /// Apply a batch: report it, reload rules if needed and regenerate.
    ///
    /// Returns the written paths, or `None` when nothing relevant changed.
    ///
    /// # Errors
    ///
    /// Returns an error if regeneration fails.
    pub fn handle_batch(
        &mut self,
        changes: &[PathChange],
    ) -> Result<Option<Vec<PathBuf>>, GenerateError> {
        let plan = self.plan_batch(changes);
        if !plan.needs_update() {
            tracing::trace!(changes = changes.len(), "Ignoring irrelevant changes");
            return Ok(None);
        }

        let root = self.generator.settings().watch_path.clone();
        for change in &plan.relevant {
            let shown = relative_to_root(&change.path, &root).unwrap_or(change.path.as_path());
            display::print_change(&change.kind.to_string(), shown);
            tracing::debug!(kind = ?change.kind, path = %change.path.display(), "Change detected");
        }

        if plan.reload_rules {
            self.generator.reload_ignore_rules();
        }

        self.generator.update_documentation().map(Some)
    }

    /// Watch the generator's root until cancelled.
    ///
    /// Generation failures are reported and the loop keeps running.
    ///
    /// # Errors
    ///
    /// Returns an error if the watcher cannot be started.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<WatchOutcome, WatcherError> {
        let root = self.generator.settings().watch_path.clone();
        let (watcher, mut rx) = ProjectWatcher::new(root.clone(), self.debounce)?;
        display::print_watching(&root);
        tracing::info!(path = %root.display(), "Watching for changes");

        let outcome = loop {
            tokio::select! {
                () = cancel.cancelled() => break WatchOutcome::Cancelled,
                event = rx.recv() => match event {
                    Some(WatchEvent::Changes(changes)) => {
                        if let Err(e) = self.handle_batch(&changes) {
                            display::print_error(&format!("Failed to update documentation: {e}"));
                            tracing::error!(error = %e, "Failed to update documentation");
                        }
                    }
                    Some(WatchEvent::Error(e)) => {
                        tracing::warn!(error = %e, "Watcher reported an error");
                    }
                    None => break WatchOutcome::ChannelClosed,
                },
            }
        };

        drop(watcher);
        tracing::info!(outcome = ?outcome, "Stopped watching");
        Ok(outcome)
    }
}

fn relative_to_root<'a>(path: &'a Path, root: &Path) -> Option<&'a Path> {
    path.strip_prefix(root).ok()
}
