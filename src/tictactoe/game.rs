//! Actions, outcomes and game records

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// A placement of `player`'s mark at `position` (0-8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub player: Player,
    pub position: usize,
}

impl Action {
    pub fn new(player: Player, position: usize) -> Self {
        Action { player, position }
    }

    /// Row and column of the target cell
    pub fn coordinates(&self) -> (usize, usize) {
        (self.position / 3, self.position % 3)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.coordinates();
        write!(f, "{} at ({row}, {col})", self.player)
    }
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Minimax value from X's point of view: +1 for an X win, -1 for an O
    /// win, 0 for a draw.
    pub fn value(self) -> i8 {
        match self {
            GameOutcome::Win(Player::X) => 1,
            GameOutcome::Win(Player::O) => -1,
            GameOutcome::Draw => 0,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Win(player) => write!(f, "{player} wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// A game played from the empty board, with its move history
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub moves: Vec<Action>,
    pub outcome: Option<GameOutcome>,
    #[serde(skip)]
    state: BoardState,
}

impl Game {
    /// Create a new game from the empty board
    pub fn new() -> Self {
        Game {
            moves: Vec::new(),
            outcome: None,
            state: BoardState::new(),
        }
    }

    /// Play an action, replacing the current state with its successor
    pub fn play(&mut self, action: Action) -> Result<BoardState, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let next = self.state.apply_action(action)?;
        self.moves.push(action);
        self.outcome = next.check_outcome();
        self.state = next;
        Ok(next)
    }

    /// Current board state
    pub fn current_state(&self) -> BoardState {
        self.state
    }

    /// Get the sequence of board states, starting with the empty board
    ///
    /// # Errors
    ///
    /// Returns error if any recorded move is illegal in its position. This
    /// indicates corrupted game data, e.g. a hand-edited transcript.
    pub fn state_sequence(&self) -> Result<Vec<BoardState>, crate::Error> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut state = BoardState::new();
        states.push(state);

        for &action in &self.moves {
            state = state.apply_action(action)?;
            states.push(state);
        }

        Ok(states)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
