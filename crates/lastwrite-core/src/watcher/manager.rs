//! Watch manager: owns the watch set of one root

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use super::backend::WatchBackend;
use crate::{types::WatchRoot, Error, Result};

/// Result of a single watch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    Added,
    AlreadyWatched,
    Failed,
}

/// Establishes and extends the watches of one [`WatchRoot`].
///
/// The watch set only grows. Removed directories leave stale entries behind.
pub struct WatchManager<B> {
    root: WatchRoot,
    backend: B,
    watched: HashSet<PathBuf>,
}

impl<B: WatchBackend> WatchManager<B> {
    /// Watch the root, and in recursive mode every directory beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatchSetup`] if the root itself cannot be watched.
    /// Subdirectory failures are logged and skipped.
    pub fn start(root: WatchRoot, backend: B) -> Result<Self> {
        let mut manager = Self {
            root,
            backend,
            watched: HashSet::new(),
        };

        let root_path = manager.root.path().to_path_buf();
        manager
            .backend
            .watch(&root_path)
            .map_err(|e| Error::watch_setup(manager.root.label(), e.to_string()))?;
        manager.watched.insert(root_path.clone());
        tracing::info!("Watching {}", manager.root);

        if manager.root.is_recursive() {
            let added = manager.walk_and_watch(&root_path);
            tracing::info!(
                root = manager.root.label(),
                subdirectories = added,
                "Initial recursive walk complete"
            );
        }

        Ok(manager)
    }

    /// Install one watch. Failure leaves a coverage gap but is not fatal.
    pub fn add_watch(&mut self, path: &Path) -> WatchOutcome {
        if self.watched.contains(path) {
            return WatchOutcome::AlreadyWatched;
        }

        match self.backend.watch(path) {
            Ok(()) => {
                tracing::debug!("Watching {}", path.display());
                self.watched.insert(path.to_path_buf());
                WatchOutcome::Added
            }
            Err(e) => {
                tracing::warn!(root = self.root.label(), "{e}");
                WatchOutcome::Failed
            }
        }
    }

    /// Watch a newly appeared directory and everything beneath it.
    ///
    /// Returns how many new watches were installed.
    pub fn extend(&mut self, path: &Path) -> usize {
        self.walk_and_watch(path)
    }

    pub const fn root(&self) -> &WatchRoot {
        &self.root
    }

    pub fn is_watched(&self, path: &Path) -> bool {
        self.watched.contains(path)
    }

    pub fn watch_count(&self) -> usize {
        self.watched.len()
    }

    fn walk_and_watch(&mut self, path: &Path) -> usize {
        let dirs: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(root = self.root.label(), "Skipping during walk: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .map(walkdir::DirEntry::into_path)
            .collect();

        dirs.iter()
            .filter(|dir| self.add_watch(dir) == WatchOutcome::Added)
            .count()
    }
}
