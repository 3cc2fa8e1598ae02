//! Play command - Interactive game against the minimax engine
//!
//! The session threads the board through its loop as a value: every move
//! replaces the current state with the successor returned by the core.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use tracing::{debug, info};

use crate::{
    cli::config::PlayConfig,
    search::{Minimax, TieBreak},
    tictactoe::{Action, BoardState, Game, GameOutcome, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play a game against the computer")]
pub struct PlayArgs {
    /// Which mark you play (`x` moves first, `o` lets the computer open)
    #[arg(long, default_value = "x")]
    pub human: String,

    /// How the computer breaks ties between equally scored moves
    #[arg(long, default_value = "action-order")]
    pub tie_break: TieBreak,
}

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "player1" | "p1" => Ok(Player::X),
        "o" | "second" | "player2" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

/// Parse one board coordinate in `0..=2`.
pub fn parse_coordinate(input: &str) -> crate::Result<usize> {
    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(value) if value <= 2 => Ok(value),
        _ => Err(crate::Error::InvalidCoordinate {
            input: trimmed.to_string(),
        }),
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = PlayConfig {
        human: parse_player_token(&args.human, "--human")?,
        tie_break: args.tie_break,
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let game = Session::new(config, stdin.lock(), stdout.lock()).run()?;
    info!(moves = game.moves.len(), outcome = ?game.outcome, "game over");
    Ok(())
}

/// One interactive game over arbitrary line input and text output
pub struct Session<R, W> {
    config: PlayConfig,
    engine: Minimax,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: PlayConfig, input: R, output: W) -> Self {
        Self {
            engine: Minimax::new(config.tie_break),
            config,
            input,
            output,
        }
    }

    /// Play until the board is decided and return the finished game.
    ///
    /// # Errors
    ///
    /// Fails if the input ends before the game does or writing fails.
    pub fn run(mut self) -> Result<Game> {
        writeln!(self.output, "|------- WELCOME TO TIC TAC TOE -----------|")?;
        writeln!(
            self.output,
            "You are {} while the Computer is {}",
            self.config.human,
            self.config.computer()
        )?;

        let mut game = Game::new();
        while game.outcome.is_none() {
            let state = game.current_state();
            let Some(to_move) = state.whose_turn() else {
                break;
            };

            let action = if to_move == self.config.human {
                writeln!(self.output, "\nIt is your turn\n")?;
                self.human_action(&state, to_move)?
            } else {
                writeln!(self.output, "\nThe computer is playing its turn")?;
                let decision = self.engine.decide(&state)?;
                debug!(action = %decision.action, result = %decision.result, "computer move");
                decision.action
            };

            let next = game.play(action)?;
            writeln!(self.output, "{next}")?;
        }

        let message = match game.outcome {
            Some(GameOutcome::Win(winner)) if winner == self.config.human => "You have won!",
            Some(GameOutcome::Win(_)) => "You have lost!",
            Some(GameOutcome::Draw) | None => "It's a tie.",
        };
        writeln!(self.output, "{message}")?;
        self.output.flush()?;

        Ok(game)
    }

    /// Ask for coordinates until they name an empty cell
    fn human_action(&mut self, state: &BoardState, player: Player) -> Result<Action> {
        loop {
            let row = self.read_coordinate("Enter the x-coordinate [0-2]: ")?;
            let col = self.read_coordinate("Enter the y-coordinate [0-2]: ")?;
            let position = 3 * row + col;

            if state.is_empty(position) {
                return Ok(Action::new(player, position));
            }
            writeln!(
                self.output,
                "That coordinate is already taken. Please try again."
            )?;
        }
    }

    fn read_coordinate(&mut self, prompt: &str) -> Result<usize> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read coordinate")?;
            if read == 0 {
                bail!("input closed before the game finished");
            }

            match parse_coordinate(&line) {
                Ok(value) => return Ok(value),
                Err(err) => writeln!(self.output, "{err}. Please try again.")?,
            }
        }
    }
}
