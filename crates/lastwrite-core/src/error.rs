//! Error types for lastwrite with categorization:
//!
//! - **Validation errors**: configuration and input parsing (exit code 1)
//! - **System errors**: IO, watch setup, metrics registration (exit code 2)

use thiserror::Error;

/// Top-level error type for the exporter core.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration value is missing or out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input (config file, flag value) could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),

    /// The watch subsystem could not be created for a root, or the root
    /// itself could not be watched
    #[error("Failed to set up watch for {root}: {reason}")]
    WatchSetup { root: String, reason: String },

    /// Every configured root failed setup
    #[error("None of the {0} configured directories could be watched")]
    NoRootsWatched(usize),

    /// Metric registration or encoding failed
    #[error("Metrics error: {0}")]
    Metrics(String),
}

impl Error {
    /// Create a validation error from an invalid config.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a parse error.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a system error from an IO failure.
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::IoError(msg.into())
    }

    /// Create a setup error for one watch root.
    pub fn watch_setup(root: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::WatchSetup {
            root: root.into(),
            reason: reason.into(),
        }
    }

    /// Returns the process exit code for this error.
    ///
    /// - 1: user error (validation, bad configuration)
    /// - 2: system error (IO, watch setup, metrics)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig(_) | Self::ParseError(_) => 1,
            Self::IoError(_)
            | Self::WatchSetup { .. }
            | Self::NoRootsWatched(_)
            | Self::Metrics(_) => 2,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::parse_error(format!("Failed to parse config: {err}"))
    }
}

impl From<prometheus::Error> for Error {
    fn from(err: prometheus::Error) -> Self {
        Self::Metrics(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
