//! Metrics sink for per-directory last-write gauges
//!
//! The aggregator publishes through [`MetricsSink`]; [`PrometheusSink`]
//! backs it with two `GaugeVec`s registered in an explicit registry.

use prometheus::{GaugeVec, Opts, Registry};

use crate::Result;

pub const LAST_WRITE_TIMESTAMP_METRIC: &str = "file_last_write_timestamp_seconds";
pub const LAST_WRITE_AGE_METRIC: &str = "file_last_write_age_seconds";
pub const DIRECTORY_LABEL: &str = "directory";

/// Destination for the two derived values of each watched root.
pub trait MetricsSink: Send + Sync {
    fn publish_last_write(&self, directory: &str, timestamp_secs: i64);
    fn publish_age(&self, directory: &str, age_secs: i64);
}

/// Prometheus-backed sink
#[derive(Debug, Clone)]
pub struct PrometheusSink {
    last_write: GaugeVec,
    age: GaugeVec,
}

impl PrometheusSink {
    /// Create both gauges and register them in `registry`.
    ///
    /// # Errors
    ///
    /// Returns error if a gauge with the same name is already registered
    pub fn register(registry: &Registry) -> Result<Self> {
        let last_write = GaugeVec::new(
            Opts::new(
                LAST_WRITE_TIMESTAMP_METRIC,
                "Last modification timestamp of any file in directory (event-driven)",
            ),
            &[DIRECTORY_LABEL],
        )?;
        let age = GaugeVec::new(
            Opts::new(
                LAST_WRITE_AGE_METRIC,
                "Seconds since the last observed write in directory",
            ),
            &[DIRECTORY_LABEL],
        )?;

        registry.register(Box::new(last_write.clone()))?;
        registry.register(Box::new(age.clone()))?;

        Ok(Self { last_write, age })
    }
}

#[allow(clippy::cast_precision_loss)]
impl MetricsSink for PrometheusSink {
    fn publish_last_write(&self, directory: &str, timestamp_secs: i64) {
        self.last_write
            .with_label_values(&[directory])
            .set(timestamp_secs as f64);
    }

    fn publish_age(&self, directory: &str, age_secs: i64) {
        self.age.with_label_values(&[directory]).set(age_secs as f64);
    }
}

/// Read one gauge sample from a registry, if it has been published.
#[cfg(test)]
pub(crate) fn read_gauge(registry: &Registry, metric: &str, directory: &str) -> Option<f64> {
    let families = registry.gather();
    families
        .iter()
        .filter(|family| family.get_name() == metric)
        .flat_map(|family| family.get_metric().iter())
        .find(|sample| {
            sample
                .get_label()
                .iter()
                .any(|label| label.get_name() == DIRECTORY_LABEL && label.get_value() == directory)
        })
        .map(|sample| sample.get_gauge().get_value())
}
