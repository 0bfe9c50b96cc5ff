//! Configuration loading and management
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Config file: `--config <path>`, else ~/.config/lastwrite/config.toml
//! 3. Environment variables: `LASTWRITE_*`
//! 4. CLI flags
//!
//! # Example Config
//!
//! ```toml
//! dirs = ["/data", "/srv/uploads"]
//! recursive = true
//! refresh_interval_secs = 10
//! setup_failure = "isolate"
//!
//! [web]
//! listen_address = ":9150"
//! telemetry_path = "/metrics"
//! ```

mod defaults;
mod load;
mod types;
mod validate;

#[cfg(test)]
mod tests_loading;
#[cfg(test)]
mod tests_validation;

pub use defaults::{DEFAULT_LISTEN_ADDRESS, DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_TELEMETRY_PATH};
pub use load::{
    global_config_path, load_config, load_toml_file, parse_dir_list, ENV_DIRS,
    ENV_LISTEN_ADDRESS, ENV_RECURSIVE, ENV_REFRESH_INTERVAL_SECS,
};
pub use types::{Config, SetupFailurePolicy, WebConfig};
