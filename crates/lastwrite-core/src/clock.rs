//! Wall-clock source for last-write timestamps

use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "now" in unix seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Real time via `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock that only moves when told to. Used to pin timestamps in tests and
/// scenario runs.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub const fn new(start: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    pub fn set(&self, secs: i64) {
        self.now.store(secs, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
