//! Directory state aggregator
//!
//! Maps each watch root label to the unix time of its last observed write.
//! A single mutex guards the whole map; every dispatcher and the periodic
//! age refresher go through it, and the gauges are published from inside
//! the same critical section so published values never diverge from the map.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
    time::Duration,
};

use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::MissedTickBehavior,
};

use crate::{clock::Clock, shutdown::ShutdownSignal, sink::MetricsSink};

// ═══════════════════════════════════════════════════════════════════════════
// AGGREGATOR
// ═══════════════════════════════════════════════════════════════════════════

pub struct DirectoryState {
    last_write: Mutex<HashMap<String, i64>>,
    sink: Arc<dyn MetricsSink>,
    clock: Arc<dyn Clock>,
}

impl DirectoryState {
    pub fn new(sink: Arc<dyn MetricsSink>, clock: Arc<dyn Clock>) -> Self {
        Self {
            last_write: Mutex::new(HashMap::new()),
            sink,
            clock,
        }
    }

    /// Set `lastWrite[root] = now` and publish the timestamp gauge.
    ///
    /// Returns the recorded timestamp.
    pub async fn record_write(&self, root: &str) -> i64 {
        let mut last_write = self.last_write.lock().await;
        let now = self.clock.now();
        last_write.insert(root.to_string(), now);
        self.sink.publish_last_write(root, now);
        drop(last_write);
        now
    }

    /// Publish `now - lastWrite` for every root seen so far.
    ///
    /// Returns the number of roots refreshed.
    pub async fn refresh_ages(&self) -> usize {
        let last_write = self.last_write.lock().await;
        let now = self.clock.now();
        for (root, written) in last_write.iter() {
            self.sink.publish_age(root, age_since(*written, now));
        }
        last_write.len()
    }

    pub async fn last_write(&self, root: &str) -> Option<i64> {
        self.last_write.lock().await.get(root).copied()
    }

    pub async fn snapshot(&self) -> BTreeMap<String, i64> {
        self.last_write
            .lock()
            .await
            .iter()
            .map(|(root, written)| (root.clone(), *written))
            .collect()
    }
}

/// Seconds elapsed since `written`, never negative.
pub const fn age_since(written: i64, now: i64) -> i64 {
    let age = now.saturating_sub(written);
    if age < 0 {
        0
    } else {
        age
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PERIODIC REFRESH
// ═══════════════════════════════════════════════════════════════════════════

/// Spawn the background task that recomputes ages every `interval`.
///
/// The first refresh runs immediately. The task exits on the first shutdown
/// signal (or when the coordinator is dropped).
pub fn spawn_age_refresher(
    state: Arc<DirectoryState>,
    interval: Duration,
    mut shutdown: broadcast::Receiver<ShutdownSignal>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let refreshed = state.refresh_ages().await;
                    tracing::trace!(refreshed, "Refreshed last-write ages");
                }
                _ = shutdown.recv() => {
                    tracing::info!("Age refresher stopping");
                    return;
                }
            }
        }
    })
}
