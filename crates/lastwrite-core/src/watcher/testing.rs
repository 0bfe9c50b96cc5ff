//! In-memory watch backend for unit tests

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use super::WatchBackend;
use crate::{Error, Result};

/// Records watch requests; can be told to reject one path or any path that
/// is not an existing directory, or to take a while per request.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeBackend {
    watched: Arc<Mutex<Vec<PathBuf>>>,
    fail_on: Option<PathBuf>,
    reject_missing: bool,
    delay: Option<Duration>,
}

impl FakeBackend {
    pub(crate) fn failing_on(path: &Path) -> Self {
        Self {
            fail_on: Some(path.to_path_buf()),
            ..Self::default()
        }
    }

    pub(crate) fn rejecting_missing() -> Self {
        Self {
            reject_missing: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub(crate) fn watched(&self) -> Vec<PathBuf> {
        self.watched.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl WatchBackend for FakeBackend {
    fn watch(&mut self, path: &Path) -> Result<()> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.fail_on.as_deref() == Some(path) {
            return Err(Error::io_error(format!(
                "Failed to watch {}: permission denied",
                path.display()
            )));
        }
        if self.reject_missing && !path.is_dir() {
            return Err(Error::io_error(format!(
                "Failed to watch {}: no such directory",
                path.display()
            )));
        }
        self.watched
            .lock()
            .map_err(|e| Error::io_error(e.to_string()))?
            .push(path.to_path_buf());
        Ok(())
    }
}
