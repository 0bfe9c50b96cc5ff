//! # lastwrite core
//!
//! Watches directory trees and keeps, per watched root, the time of the last
//! observed write and the age since then, published as Prometheus gauges.
//!
//! ## Pieces
//!
//! - [`watcher`]: per-root watch manager and event dispatcher
//! - [`state`]: the shared last-write map and the periodic age refresh
//! - [`sink`]: where derived values are published
//! - [`exporter`]: startup wiring and the setup-failure policy
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` / `expect()` / `panic!()` outside tests
//! - No `unsafe` - safe Rust only
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, Error>`. Failures are kept to
//! the narrowest scope: a subdirectory that cannot be watched is logged and
//! skipped, a root that cannot be watched is handled by the configured
//! [`SetupFailurePolicy`].

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]

pub mod clock;
pub mod config;
mod error;
pub mod event;
pub mod exporter;
pub mod shutdown;
pub mod sink;
pub mod state;
pub mod types;
pub mod watcher;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{load_config, Config, SetupFailurePolicy, WebConfig};
pub use error::{Error, Result};
pub use event::{classify, FsEvent, FsOp};
pub use exporter::{Exporter, RootFailure, StartReport};
pub use shutdown::{signal_channels, ShutdownCoordinator, ShutdownOutcome, ShutdownSignal};
pub use sink::{MetricsSink, PrometheusSink, LAST_WRITE_AGE_METRIC, LAST_WRITE_TIMESTAMP_METRIC};
pub use state::{spawn_age_refresher, DirectoryState};
pub use types::WatchRoot;
