//! Watch backends and the notification bridge into tokio

use std::path::Path;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::{Error, Result};

/// Installs single-directory watches.
///
/// Recursion is handled by [`super::WatchManager`], so implementations only
/// ever watch one directory per call.
pub trait WatchBackend: Send {
    fn watch(&mut self, path: &Path) -> Result<()>;
}

/// The two inbound streams of one root's dispatcher
#[derive(Debug)]
pub struct NotificationStreams {
    pub events: mpsc::UnboundedReceiver<notify::Event>,
    pub errors: mpsc::UnboundedReceiver<notify::Error>,
}

/// Backend over the platform's recommended `notify` watcher
pub struct NotifyBackend {
    watcher: RecommendedWatcher,
}

impl NotifyBackend {
    /// Create the OS watcher handle and the channels it feeds.
    ///
    /// Events and errors are forwarded from the `notify` event loop without
    /// ever blocking it: that loop also services [`WatchBackend::watch`]
    /// requests, which are issued while events are still queued (initial
    /// walk, subtree extension). Once the receivers are dropped, notifications
    /// are discarded.
    ///
    /// # Errors
    ///
    /// Returns error if the OS watcher cannot be created
    pub fn new() -> Result<(Self, NotificationStreams)> {
        let (event_tx, events) = mpsc::unbounded_channel();
        let (error_tx, errors) = mpsc::unbounded_channel();

        let watcher = notify::recommended_watcher(
            move |res: std::result::Result<notify::Event, notify::Error>| match res {
                Ok(event) => {
                    let _ = event_tx.send(event);
                }
                Err(err) => {
                    let _ = error_tx.send(err);
                }
            },
        )
        .map_err(|e| Error::io_error(format!("Failed to create file watcher: {e}")))?;

        Ok((Self { watcher }, NotificationStreams { events, errors }))
    }
}

impl WatchBackend for NotifyBackend {
    fn watch(&mut self, path: &Path) -> Result<()> {
        self.watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|e| Error::io_error(format!("Failed to watch {}: {e}", path.display())))
    }
}
