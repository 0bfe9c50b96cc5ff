//! Configuration loading from files and environment
//!
//! This module handles loading configuration from:
//! 1. Built-in defaults
//! 2. Config file: `--config <path>`, or the global config if it exists
//! 3. Environment variables: `LASTWRITE_*`
//!
//! CLI flags are applied by the binary on top of the returned value.

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::{Error, Result};

pub const ENV_DIRS: &str = "LASTWRITE_DIRS";
pub const ENV_RECURSIVE: &str = "LASTWRITE_RECURSIVE";
pub const ENV_LISTEN_ADDRESS: &str = "LASTWRITE_LISTEN_ADDRESS";
pub const ENV_REFRESH_INTERVAL_SECS: &str = "LASTWRITE_REFRESH_INTERVAL_SECS";

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from defaults, a config file and the environment.
///
/// An explicit path must exist; the global config is optional.
///
/// # Errors
///
/// Returns error if:
/// - The explicit config file is missing or unreadable
/// - A config file is malformed TOML
/// - An environment variable holds an unparseable value
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => load_toml_file(path)?,
        None => match global_config_path() {
            Some(global) if global.is_file() => load_toml_file(&global)?,
            _ => Config::default(),
        },
    };

    config.apply_env_vars()
}

/// Get path to global config file
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "lastwrite")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Load a TOML file into a Config, filling unspecified keys with defaults
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read
/// - Path is a directory instead of a file
/// - TOML is malformed
pub fn load_toml_file(path: &Path) -> Result<Config> {
    if path.is_dir() {
        return Err(Error::io_error(format!(
            "Config path is a directory, not a file: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::io_error(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::parse_error(format!(
            "Failed to parse config file {}: {e}",
            path.display()
        ))
    })
}

/// Split an OS path list (colon-separated on Unix) into directory entries.
///
/// Empty entries are dropped.
pub fn parse_dir_list(list: &str) -> Vec<String> {
    std::env::split_paths(list)
        .map(|path| path.to_string_lossy().into_owned())
        .filter(|dir| !dir.is_empty())
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// ENVIRONMENT VARIABLE OVERRIDES
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Apply `LASTWRITE_*` environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns error if environment variable values are invalid
    pub fn apply_env_vars(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns error if a variable value is invalid
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dirs) = lookup(ENV_DIRS) {
            self.dirs = parse_dir_list(&dirs);
        }

        if let Some(recursive) = lookup(ENV_RECURSIVE) {
            self.recursive = parse_bool(ENV_RECURSIVE, &recursive)?;
        }

        if let Some(address) = lookup(ENV_LISTEN_ADDRESS) {
            self.web.listen_address = address;
        }

        if let Some(secs) = lookup(ENV_REFRESH_INTERVAL_SECS) {
            self.refresh_interval_secs = secs.trim().parse().map_err(|e| {
                Error::parse_error(format!("{ENV_REFRESH_INTERVAL_SECS}={secs}: {e}"))
            })?;
        }

        Ok(self)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::parse_error(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}
