//! Simulate command - Batch games between the engine and an opponent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::play::parse_player_token;
use crate::{
    cli::output::{format_share, print_kv, print_section},
    pipeline::{OpponentKind, ProgressObserver, SimulationConfig, SimulationPipeline},
    search::TieBreak,
};

/// Smallest batch that gets a progress bar
const PROGRESS_MIN_GAMES: usize = 100;

#[derive(Parser, Debug)]
#[command(about = "Play batches of games against the engine")]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 10)]
    pub games: usize,

    /// Opponent (minimax, random)
    #[arg(long, short = 'o', default_value = "minimax")]
    pub opponent: OpponentKind,

    /// Mark the engine plays (`x` or `o`)
    #[arg(long, default_value = "o")]
    pub engine_player: String,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Tie-break policy for every minimax player
    #[arg(long, default_value = "action-order")]
    pub tie_break: TieBreak,

    /// Hide the progress bar shown for batches of 100 games or more
    #[arg(long)]
    pub no_progress: bool,

    /// Export results and transcripts to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl SimulateArgs {
    fn to_config(&self) -> Result<SimulationConfig> {
        Ok(SimulationConfig {
            num_games: self.games,
            seed: self.seed,
            opponent: self.opponent,
            engine_player: parse_player_token(&self.engine_player, "--engine-player")?,
            tie_break: self.tie_break,
        })
    }

    fn show_progress(&self) -> bool {
        !self.no_progress && self.games >= PROGRESS_MIN_GAMES
    }
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let config = args.to_config()?;
    let mut pipeline =
        SimulationPipeline::new(config.clone()).keep_games(args.export.is_some());
    if args.show_progress() {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = pipeline.run()?;

    print_section("Simulation Results");
    print_kv("Engine", &format!("{} ({})", config.engine_player, config.tie_break));
    print_kv("Opponent", &config.opponent.to_string());
    print_kv("Games", &result.total_games.to_string());
    print_kv("Engine wins", &format_share(result.wins, result.total_games));
    print_kv("Draws", &format_share(result.draws, result.total_games));
    print_kv("Engine losses", &format_share(result.losses, result.total_games));

    if let Some(path) = args.export {
        result
            .save(&path)
            .with_context(|| format!("failed to export results to {}", path.display()))?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}
