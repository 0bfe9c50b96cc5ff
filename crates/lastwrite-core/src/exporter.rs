//! Exporter wiring
//!
//! Builds the registry, sink and shared state once at startup, then starts
//! one watch manager + dispatcher per root under the configured
//! [`SetupFailurePolicy`] and the periodic age refresher. Every spawned task
//! is registered with the [`ShutdownCoordinator`].

use std::sync::Arc;

use prometheus::Registry;
use tokio::{sync::broadcast, task::JoinHandle};

use crate::{
    clock::{Clock, SystemClock},
    config::{Config, SetupFailurePolicy},
    shutdown::{ShutdownCoordinator, ShutdownSignal},
    sink::PrometheusSink,
    state::{spawn_age_refresher, DirectoryState},
    types::WatchRoot,
    watcher::{DispatchExit, Dispatcher, NotificationStreams, NotifyBackend, WatchManager},
    Error, Result,
};

// ═══════════════════════════════════════════════════════════════════════════
// TYPES
// ═══════════════════════════════════════════════════════════════════════════

/// A root that could not be watched at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootFailure {
    pub root: String,
    pub reason: String,
}

/// Which roots are being monitored after [`Exporter::start`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartReport {
    pub started: Vec<String>,
    pub failed: Vec<RootFailure>,
}

pub struct Exporter {
    registry: Registry,
    state: Arc<DirectoryState>,
}

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

impl Exporter {
    /// Exporter on wall-clock time
    ///
    /// # Errors
    ///
    /// Returns error if the gauges cannot be registered
    pub fn new() -> Result<Self> {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Exporter on an injected clock
    ///
    /// # Errors
    ///
    /// Returns error if the gauges cannot be registered
    pub fn with_clock(clock: Arc<dyn Clock>) -> Result<Self> {
        let registry = Registry::new();
        let sink = PrometheusSink::register(&registry)?;
        let state = Arc::new(DirectoryState::new(Arc::new(sink), clock));
        Ok(Self { registry, state })
    }

    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> Arc<DirectoryState> {
        Arc::clone(&self.state)
    }

    /// Start monitoring every configured root, then the age refresher.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The policy is `abort` and any root fails setup
    /// - The policy is `isolate` and every root fails setup
    pub async fn start(
        &self,
        config: &Config,
        coordinator: &ShutdownCoordinator,
    ) -> Result<StartReport> {
        let mut report = StartReport::default();

        for root in config.watch_roots() {
            let label = root.label().to_string();
            match start_root(root, self.state(), coordinator.subscribe()).await {
                Ok(task) => {
                    coordinator.register_task(task).await;
                    report.started.push(label);
                }
                Err(e) => {
                    tracing::error!("{e}");
                    match config.setup_failure {
                        SetupFailurePolicy::Abort => return Err(e),
                        SetupFailurePolicy::Isolate => report.failed.push(RootFailure {
                            root: label,
                            reason: e.to_string(),
                        }),
                    }
                }
            }
        }

        if report.started.is_empty() {
            return Err(Error::NoRootsWatched(report.failed.len()));
        }

        let refresher = spawn_age_refresher(
            self.state(),
            config.refresh_interval(),
            coordinator.subscribe(),
        );
        coordinator.register_task(refresher).await;

        tracing::info!(
            started = report.started.len(),
            failed = report.failed.len(),
            "Exporter started"
        );
        Ok(report)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HELPER FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════

/// Set up one root off the async threads (the initial walk can be large),
/// then spawn its dispatcher.
async fn start_root(
    root: WatchRoot,
    state: Arc<DirectoryState>,
    shutdown: broadcast::Receiver<ShutdownSignal>,
) -> Result<JoinHandle<()>> {
    let label = root.label().to_string();

    let (manager, streams) = tokio::task::spawn_blocking(move || setup_root(root))
        .await
        .map_err(|e| Error::watch_setup(&label, format!("setup task failed: {e}")))??;

    Ok(tokio::spawn(async move {
        let exit = Dispatcher::new(manager, state).run(streams, shutdown).await;
        if exit == DispatchExit::StreamClosed {
            tracing::warn!(root = %label, "Dispatcher ended without shutdown");
        }
    }))
}

fn setup_root(root: WatchRoot) -> Result<(WatchManager<NotifyBackend>, NotificationStreams)> {
    let (backend, streams) =
        NotifyBackend::new().map_err(|e| Error::watch_setup(root.label(), e.to_string()))?;
    let manager = WatchManager::start(root, backend)?;
    Ok((manager, streams))
}
