//! Agent port - abstraction over anything that picks moves
//!
//! Simulations pit two agents against each other without knowing whether a
//! side is the minimax engine or a random baseline.

use crate::{
    Result,
    tictactoe::{Action, BoardState},
};

/// Agent trait - unified interface for move selection
pub trait Agent: Send {
    /// Select an action for the player to move in `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid moves are available (terminal state).
    fn select_action(&mut self, state: &BoardState) -> Result<Action>;

    /// Get the agent's name.
    ///
    /// Used for identification in reports and logging.
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// Deterministic agents can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
