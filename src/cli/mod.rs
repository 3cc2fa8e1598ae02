//! CLI infrastructure for the noughts binary
//!
//! This module provides the interactive game, batch simulation and position
//! analysis commands, plus logging setup.

pub mod commands;
pub mod config;
pub mod output;

use config::LoggingConfig;

/// Install the global tracing subscriber, writing to stderr.
pub fn init_tracing(config: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
