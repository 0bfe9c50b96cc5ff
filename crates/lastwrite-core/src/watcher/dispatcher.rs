//! Per-root event dispatcher
//!
//! Consumes the notification and error streams of one root, records
//! activity in the shared [`DirectoryState`] and asks the
//! [`WatchManager`] to extend coverage when directories appear.
//!
//! Extensions walk the new subtree and install watches synchronously, so
//! they run on the blocking pool with the manager behind a mutex.

use std::{path::PathBuf, sync::Arc};

use tokio::sync::{broadcast, Mutex, MutexGuard};

use super::{backend::NotificationStreams, manager::WatchManager, WatchBackend};
use crate::{
    event::{classify, FsOp},
    shutdown::ShutdownSignal,
    state::DirectoryState,
    types::WatchRoot,
};

/// Why a dispatcher loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchExit {
    /// A notification stream closed; the root is no longer monitored
    StreamClosed,
    /// Shutdown was requested
    Shutdown,
}

pub struct Dispatcher<B> {
    root: WatchRoot,
    manager: Arc<Mutex<WatchManager<B>>>,
    state: Arc<DirectoryState>,
}

impl<B: WatchBackend + 'static> Dispatcher<B> {
    pub fn new(manager: WatchManager<B>, state: Arc<DirectoryState>) -> Self {
        Self {
            root: manager.root().clone(),
            manager: Arc::new(Mutex::new(manager)),
            state,
        }
    }

    /// Run until a stream closes or shutdown is signalled.
    ///
    /// Events and errors are each handled in arrival order; there is no
    /// ordering between the two streams.
    pub async fn run(
        mut self,
        streams: NotificationStreams,
        mut shutdown: broadcast::Receiver<ShutdownSignal>,
    ) -> DispatchExit {
        let NotificationStreams {
            mut events,
            mut errors,
        } = streams;
        let label = self.root.label().to_string();

        loop {
            tokio::select! {
                maybe_event = events.recv() => match maybe_event {
                    Some(event) => self.handle_event(&event).await,
                    None => {
                        tracing::info!(root = %label, "Notification stream closed, root no longer monitored");
                        return DispatchExit::StreamClosed;
                    }
                },
                maybe_error = errors.recv() => match maybe_error {
                    Some(err) => tracing::warn!(root = %label, "Watcher error: {err}"),
                    None => {
                        tracing::info!(root = %label, "Error stream closed, root no longer monitored");
                        return DispatchExit::StreamClosed;
                    }
                },
                signal = shutdown.recv() => {
                    tracing::debug!(root = %label, ?signal, "Dispatcher stopping");
                    return DispatchExit::Shutdown;
                }
            }
        }
    }

    /// Apply one raw notification.
    pub async fn handle_event(&mut self, event: &notify::Event) {
        let fs_events = classify(event);

        if fs_events.iter().any(|e| e.op.marks_write()) {
            self.state.record_write(self.root.label()).await;
        }

        if !self.root.is_recursive() {
            return;
        }

        let created_dirs: Vec<PathBuf> = fs_events
            .into_iter()
            .filter(|e| e.op == FsOp::Create && e.path.is_dir())
            .map(|e| e.path)
            .collect();

        if !created_dirs.is_empty() {
            self.extend(created_dirs).await;
        }
    }

    /// Lock the watch manager, e.g. to inspect the watch set.
    pub async fn manager(&self) -> MutexGuard<'_, WatchManager<B>> {
        self.manager.lock().await
    }

    async fn extend(&self, dirs: Vec<PathBuf>) {
        let manager = Arc::clone(&self.manager);
        let label = self.root.label().to_string();

        let walked = tokio::task::spawn_blocking(move || {
            let mut manager = manager.blocking_lock();
            for dir in dirs {
                let added = manager.extend(&dir);
                tracing::debug!(root = %label, added, "Extended watches into {}", dir.display());
            }
        })
        .await;

        if let Err(e) = walked {
            tracing::warn!(root = self.root.label(), "Watch extension task failed: {e}");
        }
    }
}
