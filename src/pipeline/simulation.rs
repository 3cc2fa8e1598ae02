//! Batch simulation of engine games

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::agents::{MinimaxAgent, RandomAgent};
use crate::{
    Error, Result,
    ports::{Agent, Observer},
    search::TieBreak,
    tictactoe::{Game, GameOutcome, Player},
};

/// Who plays against the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    /// The engine itself (perfect self-play)
    #[default]
    Minimax,
    /// Uniformly random legal moves
    Random,
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OpponentKind::Minimax => "minimax",
            OpponentKind::Random => "random",
        };
        f.write_str(label)
    }
}

impl FromStr for OpponentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" | "optimal" | "self" => Ok(OpponentKind::Minimax),
            "random" => Ok(OpponentKind::Random),
            other => Err(Error::InvalidConfiguration {
                message: format!("unknown opponent '{other}' (expected minimax or random)"),
            }),
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of games to play
    pub num_games: usize,

    /// Random seed for the opponent
    pub seed: Option<u64>,

    /// Opponent type
    pub opponent: OpponentKind,

    /// Which mark the engine plays
    pub engine_player: Player,

    /// Tie-break policy used by every minimax agent in the run
    pub tie_break: TieBreak,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            seed: None,
            opponent: OpponentKind::default(),
            engine_player: Player::O,
            tie_break: TieBreak::default(),
        }
    }
}

/// Result of a simulation run, counted from the engine's side
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub config: SimulationConfig,

    /// Total games played
    pub total_games: usize,

    /// Number of engine wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of engine losses
    pub losses: usize,

    /// Every game with its moves, when the pipeline keeps transcripts
    pub games: Vec<Game>,
}

impl SimulationResult {
    fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            total_games: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            games: Vec::new(),
        }
    }

    fn record(&mut self, game: &Game) {
        match game.outcome {
            Some(GameOutcome::Win(winner)) if winner == self.config.engine_player => self.wins += 1,
            Some(GameOutcome::Win(_)) => self.losses += 1,
            Some(GameOutcome::Draw) | None => self.draws += 1,
        }
        self.total_games += 1;
    }

    /// Fraction of games the engine did not lose
    pub fn non_loss_rate(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        (self.wins + self.draws) as f64 / self.total_games as f64
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Runs a batch of games between the engine and an opponent
pub struct SimulationPipeline {
    config: SimulationConfig,
    observers: Vec<Box<dyn Observer>>,
    keep_games: bool,
}

impl SimulationPipeline {
    /// Create a new simulation pipeline
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            keep_games: true,
        }
    }

    /// Whether finished games are kept in [`SimulationResult::games`].
    ///
    /// Tallies are collected either way.
    pub fn keep_games(mut self, keep: bool) -> Self {
        self.keep_games = keep;
        self
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Build the agents named by the configuration and run
    pub fn run(&mut self) -> Result<SimulationResult> {
        let mut engine = MinimaxAgent::new("Minimax".to_string(), self.config.tie_break);
        let mut opponent: Box<dyn Agent> = match self.config.opponent {
            OpponentKind::Minimax => Box::new(MinimaxAgent::new(
                "Minimax".to_string(),
                self.config.tie_break,
            )),
            OpponentKind::Random => Box::new(RandomAgent::new("Random".to_string())),
        };
        self.run_with(&mut engine, opponent.as_mut())
    }

    /// Run with explicit agents; `engine` plays `config.engine_player`
    pub fn run_with(
        &mut self,
        engine: &mut dyn Agent,
        opponent: &mut dyn Agent,
    ) -> Result<SimulationResult> {
        if let Some(seed) = self.config.seed {
            engine.set_rng_seed(seed)?;
            opponent.set_rng_seed(seed.wrapping_add(1))?;
        }

        let mut result = SimulationResult::new(self.config.clone());

        for observer in &mut self.observers {
            observer.on_run_start(self.config.num_games)?;
        }

        for game_num in 0..self.config.num_games {
            let game = self.play_game(engine, opponent)?;
            debug!(
                game_num,
                moves = game.moves.len(),
                outcome = ?game.outcome,
                "game finished"
            );

            for observer in &mut self.observers {
                observer.on_game_end(game_num, &game)?;
            }
            result.record(&game);
            if self.keep_games {
                result.games.push(game);
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        info!(
            engine = engine.name(),
            opponent = opponent.name(),
            games = result.total_games,
            wins = result.wins,
            draws = result.draws,
            losses = result.losses,
            "simulation complete"
        );

        Ok(result)
    }

    fn play_game(&self, engine: &mut dyn Agent, opponent: &mut dyn Agent) -> Result<Game> {
        let mut game = Game::new();

        while game.outcome.is_none() {
            let state = game.current_state();
            let to_move = state.whose_turn().ok_or(Error::NoValidMoves)?;
            let action = if to_move == self.config.engine_player {
                engine.select_action(&state)?
            } else {
                opponent.select_action(&state)?
            };
            game.play(action)?;
        }

        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Action;

    #[test]
    fn opponent_kind_parsing() {
        assert_eq!("Random".parse::<OpponentKind>().unwrap(), OpponentKind::Random);
        assert_eq!("self".parse::<OpponentKind>().unwrap(), OpponentKind::Minimax);
        assert!("menace".parse::<OpponentKind>().is_err());
    }

    #[test]
    fn record_counts_from_engine_side() {
        let mut result = SimulationResult::new(SimulationConfig::default());
        let mut lost = Game::new();
        // X completes the top row against the engine's O
        for (player, pos) in [
            (Player::X, 0),
            (Player::O, 3),
            (Player::X, 1),
            (Player::O, 4),
            (Player::X, 2),
        ] {
            lost.play(Action::new(player, pos)).unwrap();
        }
        result.record(&lost);

        assert_eq!(result.losses, 1);
        assert_eq!(result.wins, 0);
        assert_eq!(result.non_loss_rate(), 0.0);
    }

    #[test]
    fn dropped_transcripts_keep_tallies() {
        let config = SimulationConfig {
            num_games: 3,
            ..SimulationConfig::default()
        };
        let result = SimulationPipeline::new(config)
            .keep_games(false)
            .run()
            .unwrap();

        assert!(result.games.is_empty());
        assert_eq!(result.total_games, 3);
        assert_eq!(result.draws, 3);
    }
}
