//! Default configuration values

use super::types::{Config, WebConfig};

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_LISTEN_ADDRESS: &str = ":9150";
pub const DEFAULT_TELEMETRY_PATH: &str = "/metrics";

impl Default for Config {
    fn default() -> Self {
        Self {
            dirs: Vec::new(),
            recursive: false,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            setup_failure: super::SetupFailurePolicy::default(),
            web: WebConfig::default(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            telemetry_path: DEFAULT_TELEMETRY_PATH.to_string(),
        }
    }
}
