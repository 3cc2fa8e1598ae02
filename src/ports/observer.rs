//! Observer port - abstraction for watching simulation runs

use crate::{Result, tictactoe::Game};

/// Observer trait for monitoring simulations
///
/// Methods are called in this order:
/// 1. `on_run_start(total_games)` once
/// 2. `on_game_end(game_num, game)` after every finished game
/// 3. `on_run_end()` once
pub trait Observer: Send {
    fn on_run_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, _game: &Game) -> Result<()> {
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
