//! noughts CLI - Tic-Tac-Toe against an exhaustive minimax engine
//!
//! This CLI provides:
//! - An interactive game against the computer
//! - Batch simulations for checking the engine never loses
//! - Per-move evaluation of arbitrary positions

use anyhow::Result;
use clap::{Parser, Subcommand};
use noughts::cli::{self, config::LoggingConfig};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Tic-Tac-Toe against a minimax engine", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play(cli::commands::play::PlayArgs),

    /// Play batches of games and report results
    Simulate(cli::commands::simulate::SimulateArgs),

    /// Evaluate every move in a position
    Analyze(cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    let args = Cli::parse();
    cli::init_tracing(&LoggingConfig {
        verbose: args.verbose,
    });

    match args.command {
        Commands::Play(args) => cli::commands::play::execute(args),
        Commands::Simulate(args) => cli::commands::simulate::execute(args),
        Commands::Analyze(args) => cli::commands::analyze::execute(args),
    }
}
