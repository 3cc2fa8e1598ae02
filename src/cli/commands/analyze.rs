//! Analyze command - Minimax scores for every move in a position

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output::{format_number, print_kv, print_section, print_subsection},
    search::{Decision, Minimax, SearchResult, TieBreak},
    tictactoe::{Action, BoardState, LineAnalyzer, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Show the engine's evaluation of a position")]
pub struct AnalyzeArgs {
    /// Board as 9 cells in row-major order, `_` or `.` for empty (default: empty board)
    #[arg(long)]
    pub state: Option<String>,

    /// Tie-break policy
    #[arg(long, default_value = "action-order")]
    pub tie_break: TieBreak,

    /// Print the analysis as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Everything the engine knows about one position
#[derive(Debug, Serialize)]
pub struct PositionAnalysis {
    pub board: String,
    pub to_move: Option<Player>,
    pub outcome: Option<String>,
    pub threats_x: Vec<usize>,
    pub threats_o: Vec<usize>,
    pub actions: Vec<(Action, SearchResult)>,
    pub decision: Option<Decision>,
}

/// Evaluate `state` with `engine`
pub fn analyze_position(engine: &Minimax, state: &BoardState) -> PositionAnalysis {
    let outcome = state.check_outcome();
    let (actions, decision) = if outcome.is_some() {
        (Vec::new(), None)
    } else {
        (engine.evaluate_actions(state), engine.decide(state).ok())
    };

    PositionAnalysis {
        board: state.encode(),
        to_move: state.whose_turn(),
        outcome: outcome.map(|o| o.to_string()),
        threats_x: LineAnalyzer::winning_moves(state.cells(), Player::X),
        threats_o: LineAnalyzer::winning_moves(state.cells(), Player::O),
        actions,
        decision,
    }
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let state = match &args.state {
        Some(s) => BoardState::from_string(s)?,
        None => BoardState::new(),
    };
    let engine = Minimax::new(args.tie_break);
    let analysis = analyze_position(&engine, &state);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    print_section("Position Analysis");
    println!("{state}");

    if let Some(outcome) = &analysis.outcome {
        print_kv("Outcome", outcome);
        return Ok(());
    }

    if let Some(player) = analysis.to_move {
        print_kv("To move", &player.to_string());
    }
    print_kv("Tie-break", &engine.tie_break().to_string());
    print_kv("X threats", &format!("{:?}", analysis.threats_x));
    print_kv("O threats", &format!("{:?}", analysis.threats_o));

    print_subsection("Moves (score from X's side)");
    for (action, result) in &analysis.actions {
        let (row, col) = action.coordinates();
        println!(
            "  position {} (row {row}, col {col}): {result}",
            action.position
        );
    }

    if let Some(decision) = &analysis.decision {
        print_subsection("Engine choice");
        print_kv("Move", &decision.action.to_string());
        print_kv("Result", &decision.result.to_string());
        print_kv("Nodes searched", &format_number(decision.stats.nodes));
        print_kv("Terminal leaves", &format_number(decision.stats.leaves));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_position_has_no_actions() {
        let state = BoardState::from_string("XXXOO____").unwrap();
        let analysis = analyze_position(&Minimax::default(), &state);
        assert_eq!(analysis.outcome.as_deref(), Some("X wins"));
        assert!(analysis.actions.is_empty());
        assert!(analysis.decision.is_none());
    }

    #[test]
    fn open_position_lists_threats_and_choice() {
        // X threatens 2, O threatens 5
        let state = BoardState::from_string("XX_OO____").unwrap();
        let analysis = analyze_position(&Minimax::default(), &state);

        assert_eq!(analysis.to_move, Some(Player::X));
        assert_eq!(analysis.threats_x, vec![2]);
        assert_eq!(analysis.threats_o, vec![5]);
        assert_eq!(analysis.actions.len(), 5);
        let decision = analysis.decision.unwrap();
        assert_eq!(decision.action, Action::new(Player::X, 2));
        assert_eq!(decision.result, SearchResult::new(1, 1));
    }
}
