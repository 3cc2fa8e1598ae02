//! Simulation pipeline
//!
//! Plays batches of games between agents and reports the results from the
//! engine's side.

pub mod agents;
pub mod observers;
pub mod simulation;

pub use agents::{MinimaxAgent, RandomAgent};
pub use observers::ProgressObserver;
pub use simulation::{OpponentKind, SimulationConfig, SimulationPipeline, SimulationResult};

pub use crate::ports::{Agent, Observer};
