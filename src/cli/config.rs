//! Shared configuration types for CLI commands

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::{search::TieBreak, tictactoe::Player};

/// Logging configuration for the binary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Raise the default level from `warn` to `debug`
    pub verbose: bool,
}

impl LoggingConfig {
    /// Filter from `RUST_LOG`, falling back to the verbosity default
    pub fn env_filter(&self) -> EnvFilter {
        let fallback = if self.verbose { "noughts=debug" } else { "warn" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }
}

/// Interactive game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Mark the human plays; the computer takes the other one
    pub human: Player,

    /// Tie-break policy of the computer
    pub tie_break: TieBreak,
}

impl PlayConfig {
    pub fn computer(&self) -> Player {
        self.human.opponent()
    }
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            human: Player::X,
            tie_break: TieBreak::default(),
        }
    }
}
