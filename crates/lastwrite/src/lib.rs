//! lastwrite - Prometheus exporter for directory write activity
//!
//! Watches the configured directories and serves
//! `file_last_write_timestamp_seconds` and `file_last_write_age_seconds`
//! per directory.

pub mod app;
pub mod cli;
pub mod server;
