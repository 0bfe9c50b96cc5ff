//! Configuration type definitions
//!
//! This module contains all configuration structures without behavior.
//! Each structure is a pure data holder with derived traits.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ═══════════════════════════════════════════════════════════════════════════
// MAIN CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════

/// Root configuration structure
///
/// Loaded from defaults → config file → env vars → CLI flags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Directories to watch, as given by the user
    pub dirs: Vec<String>,
    /// Watch every subdirectory, including ones created later
    pub recursive: bool,
    /// Seconds between age recomputations
    pub refresh_interval_secs: u64,
    /// What to do when one root cannot be watched at startup
    pub setup_failure: SetupFailurePolicy,
    pub web: WebConfig,
}

// ═══════════════════════════════════════════════════════════════════════════
// NESTED CONFIGURATION STRUCTURES
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WebConfig {
    /// `host:port`, or `:port` for all interfaces
    pub listen_address: String,
    pub telemetry_path: String,
}

/// Policy applied when a root's watch cannot be established at startup.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SetupFailurePolicy {
    /// Log the failing root and keep monitoring the others. Startup fails
    /// only when no root could be watched.
    #[default]
    Isolate,
    /// Abort startup on the first root that cannot be watched.
    Abort,
}
