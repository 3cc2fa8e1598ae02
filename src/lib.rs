//! Tic-Tac-Toe against an exhaustive minimax opponent
//!
//! This crate provides:
//! - An immutable board model with turn, move and outcome queries
//! - Minimax search with depth-based tie-breaking
//! - Agents and a simulation pipeline for engine-vs-opponent batches
//! - The interactive terminal driver used by the `noughts` binary

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod search;
pub mod tictactoe;

pub use error::{Error, Result};
pub use search::{Decision, Minimax, SearchResult, SearchStats, TieBreak, choose_move, score_state};
pub use tictactoe::{Action, BoardState, Cell, Game, GameOutcome, Player, initial_state};
