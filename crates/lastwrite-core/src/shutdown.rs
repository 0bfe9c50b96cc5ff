//! Graceful shutdown coordinator for the exporter.
//!
//! Broadcasts a shutdown signal to every dispatcher loop, the age refresher
//! and the HTTP server, then waits for registered tasks to drain before
//! aborting whatever is left.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};

use crate::{Error, Result};

/// Shutdown signal that can be sent to all active operations
///
/// Tasks still running once the timeout elapses are aborted rather than
/// signalled a second time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// Graceful shutdown requested (SIGINT/SIGTERM or failed startup)
    Graceful,
}

/// How [`ShutdownCoordinator::shutdown`] finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every registered task exited on its own
    Drained,
    /// The timeout elapsed and remaining tasks were aborted
    Forced,
}

/// Coordinator for graceful shutdown across all components
pub struct ShutdownCoordinator {
    /// Channel to broadcast shutdown signals
    shutdown_tx: broadcast::Sender<ShutdownSignal>,
    /// Spawned tasks that must finish before exit
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
    /// Timeout for graceful shutdown before forcing
    shutdown_timeout: Duration,
}

impl ShutdownCoordinator {
    /// Create a new shutdown coordinator
    pub fn new(shutdown_timeout: Duration) -> Self {
        let (shutdown_tx, _) = broadcast::channel(16);

        Self {
            shutdown_tx,
            tasks: Arc::new(Mutex::new(Vec::new())),
            shutdown_timeout,
        }
    }

    /// Get a receiver for shutdown signals
    ///
    /// Components should call this and listen in their async loops
    pub fn subscribe(&self) -> broadcast::Receiver<ShutdownSignal> {
        self.shutdown_tx.subscribe()
    }

    /// Register a task for cleanup on shutdown
    pub async fn register_task(&self, task: JoinHandle<()>) {
        self.tasks.lock().await.push(task);
    }

    /// Broadcast shutdown and wait for registered tasks, aborting them
    /// once the timeout elapses
    pub async fn shutdown(&self) -> ShutdownOutcome {
        tracing::info!("Initiating graceful shutdown...");

        let _ = self.shutdown_tx.send(ShutdownSignal::Graceful);

        let tasks: Vec<JoinHandle<()>> = self.tasks.lock().await.drain(..).collect();
        let abort_handles: Vec<_> = tasks.iter().map(JoinHandle::abort_handle).collect();

        let drained = tokio::time::timeout(self.shutdown_timeout, async {
            for task in tasks {
                if let Err(e) = task.await {
                    if e.is_panic() {
                        tracing::error!("Task panicked during shutdown: {e}");
                    }
                }
            }
        })
        .await;

        if drained.is_ok() {
            tracing::info!("Graceful shutdown completed");
            ShutdownOutcome::Drained
        } else {
            tracing::warn!("Shutdown timeout exceeded, aborting remaining tasks");
            abort_handles.iter().for_each(tokio::task::AbortHandle::abort);
            ShutdownOutcome::Forced
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

/// Create signal channels for SIGINT and SIGTERM
///
/// Returns receivers that will receive a value when the signal is detected
pub fn signal_channels() -> Result<(broadcast::Receiver<()>, broadcast::Receiver<()>)> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())
            .map_err(|e| Error::io_error(format!("Failed to setup SIGINT: {e}")))?;
        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| Error::io_error(format!("Failed to setup SIGTERM: {e}")))?;

        let (sigint_tx, sigint_rx) = broadcast::channel(1);
        let (sigterm_tx, sigterm_rx) = broadcast::channel(1);

        tokio::spawn(async move {
            let _ = sigint.recv().await;
            tracing::info!("Received SIGINT");
            let _ = sigint_tx.send(());
        });

        tokio::spawn(async move {
            let _ = sigterm.recv().await;
            tracing::info!("Received SIGTERM");
            let _ = sigterm_tx.send(());
        });

        Ok((sigint_rx, sigterm_rx))
    }

    #[cfg(not(unix))]
    {
        let (sigint_tx, sigint_rx) = broadcast::channel(1);
        let (sigterm_tx, sigterm_rx) = broadcast::channel(1);

        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Received Ctrl-C");
            let _ = sigint_tx.send(());
            // On non-Unix, treat both the same
            let _ = sigterm_tx.send(());
        });

        Ok::<_, Error>((sigint_rx, sigterm_rx))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_shutdown_without_tasks_drains() {
        let coordinator = ShutdownCoordinator::default();
        assert_eq!(coordinator.shutdown().await, ShutdownOutcome::Drained);
    }

    #[tokio::test]
    async fn test_shutdown_subscription() {
        let coordinator = ShutdownCoordinator::default();
        let mut rx = coordinator.subscribe();

        let outcome = coordinator.shutdown().await;
        assert_eq!(outcome, ShutdownOutcome::Drained);

        match tokio::time::timeout(Duration::from_millis(100), rx.recv()).await {
            Ok(Ok(signal)) => assert_eq!(signal, ShutdownSignal::Graceful),
            Ok(Err(e)) => unreachable!("should not receive broadcast error: {e}"),
            Err(e) => unreachable!("should receive signal within timeout: {e}"),
        }
    }

    #[tokio::test]
    async fn test_cooperative_task_drains() {
        let coordinator = ShutdownCoordinator::default();
        let mut rx = coordinator.subscribe();

        let task = tokio::spawn(async move {
            let _ = rx.recv().await;
        });
        coordinator.register_task(task).await;

        assert_eq!(coordinator.shutdown().await, ShutdownOutcome::Drained);
    }

    #[tokio::test]
    async fn test_stuck_task_is_aborted() {
        let coordinator = ShutdownCoordinator::new(Duration::from_millis(50));

        let (alive_tx, alive_rx) = tokio::sync::oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let _alive = alive_tx;
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        coordinator.register_task(task).await;

        assert_eq!(coordinator.shutdown().await, ShutdownOutcome::Forced);

        // Aborting drops the task's future, and with it the sender
        let dropped = tokio::time::timeout(Duration::from_secs(5), alive_rx)
            .await
            .expect("aborted task is dropped");
        assert!(dropped.is_err());
    }
}
