//! Recursive directory watching
//!
//! One [`WatchManager`] + [`Dispatcher`] pair runs per configured root:
//!
//! - the manager owns the root's watch set and installs watches through a
//!   [`WatchBackend`] (the real one wraps `notify::RecommendedWatcher`)
//! - the dispatcher consumes the root's notification and error streams,
//!   records activity in the shared state and extends the watch set when
//!   directories are created
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use lastwrite_core::{
//!     watcher::{Dispatcher, NotifyBackend, WatchManager},
//!     DirectoryState, PrometheusSink, ShutdownCoordinator, SystemClock, WatchRoot,
//! };
//!
//! # async fn example() -> lastwrite_core::Result<()> {
//! let registry = prometheus::Registry::new();
//! let sink = PrometheusSink::register(&registry)?;
//! let state = Arc::new(DirectoryState::new(Arc::new(sink), Arc::new(SystemClock)));
//! let coordinator = ShutdownCoordinator::default();
//!
//! let (backend, streams) = NotifyBackend::new()?;
//! let manager = WatchManager::start(WatchRoot::new("/data", true), backend)?;
//! let exit = Dispatcher::new(manager, state)
//!     .run(streams, coordinator.subscribe())
//!     .await;
//! println!("dispatcher ended: {exit:?}");
//! # Ok(())
//! # }
//! ```

mod backend;
mod dispatcher;
mod manager;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{NotificationStreams, NotifyBackend, WatchBackend};
pub use dispatcher::{DispatchExit, Dispatcher};
pub use manager::{WatchManager, WatchOutcome};
