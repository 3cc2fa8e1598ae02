//! Agent implementations: the minimax engine and a uniform random baseline

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    ports::Agent,
    search::{Minimax, TieBreak},
    tictactoe::{Action, BoardState},
};

/// Perfect-play agent backed by [`Minimax`]
pub struct MinimaxAgent {
    name: String,
    engine: Minimax,
}

impl MinimaxAgent {
    pub fn new(name: String, tie_break: TieBreak) -> Self {
        Self {
            name,
            engine: Minimax::new(tie_break),
        }
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &BoardState) -> Result<Action> {
        self.engine.choose_move(state)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Picks uniformly among the legal actions
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a new random agent
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random agent with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, state: &BoardState) -> Result<Action> {
        if state.is_terminal() {
            return Err(Error::GameOver);
        }
        let actions = state.legal_actions();
        if actions.is_empty() {
            return Err(Error::NoValidMoves);
        }
        let index = self.rng.random_range(0..actions.len());
        Ok(actions[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}
