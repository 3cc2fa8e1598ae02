//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;

pub use board::{BoardState, Cell, Player, initial_state};
pub use game::{Action, Game, GameOutcome};
pub use lines::{LineAnalyzer, WINNING_LINES};
