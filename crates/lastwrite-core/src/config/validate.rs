//! Configuration validation and derived values

use std::time::Duration;

use itertools::Itertools;

use super::types::{Config, WebConfig};
use crate::{types::WatchRoot, Error, Result};

const MIN_REFRESH_INTERVAL_SECS: u64 = 1;
const MAX_REFRESH_INTERVAL_SECS: u64 = 3600;

// ═══════════════════════════════════════════════════════════════════════════
// VALIDATION LOGIC
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any values are out of range or invalid
    pub fn validate(&self) -> Result<()> {
        if self.dirs.is_empty() {
            return Err(Error::invalid_config(
                "at least one directory is required (--dirs or LASTWRITE_DIRS)",
            ));
        }

        if self.dirs.iter().any(|dir| dir.trim().is_empty()) {
            return Err(Error::invalid_config("directory entries cannot be empty"));
        }

        if !(MIN_REFRESH_INTERVAL_SECS..=MAX_REFRESH_INTERVAL_SECS)
            .contains(&self.refresh_interval_secs)
        {
            return Err(Error::invalid_config(format!(
                "refresh_interval_secs must be {MIN_REFRESH_INTERVAL_SECS}-{MAX_REFRESH_INTERVAL_SECS}, got {}",
                self.refresh_interval_secs
            )));
        }

        self.web.validate()
    }

    /// Watch roots in configured order, duplicates collapsed (first wins)
    pub fn watch_roots(&self) -> Vec<WatchRoot> {
        self.dirs
            .iter()
            .unique()
            .map(|dir| WatchRoot::new(dir.as_str(), self.recursive))
            .collect()
    }

    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl WebConfig {
    /// Validate the listener settings
    ///
    /// # Errors
    ///
    /// Returns error if the telemetry path is not absolute or the listen
    /// address has no valid port
    pub fn validate(&self) -> Result<()> {
        if !self.telemetry_path.starts_with('/') {
            return Err(Error::invalid_config(format!(
                "telemetry_path must start with '/', got '{}'",
                self.telemetry_path
            )));
        }

        let port = self
            .listen_address
            .rsplit_once(':')
            .map(|(_, port)| port)
            .ok_or_else(|| {
                Error::invalid_config(format!(
                    "listen_address must be host:port or :port, got '{}'",
                    self.listen_address
                ))
            })?;

        port.parse::<u16>().map(|_| ()).map_err(|e| {
            Error::invalid_config(format!(
                "listen_address has invalid port '{port}': {e}"
            ))
        })
    }

    /// Address to bind, with a bare `:port` widened to all interfaces
    pub fn bind_address(&self) -> String {
        if self.listen_address.starts_with(':') {
            format!("0.0.0.0{}", self.listen_address)
        } else {
            self.listen_address.clone()
        }
    }
}
