//! Exhaustive minimax search over the Tic-Tac-Toe game tree
//!
//! Scores are always from X's point of view: X maximizes, O minimizes. Every
//! scored position also carries the ply depth of the terminal state the
//! search settled on, which is used as a secondary tie-break.
//!
//! The board is small enough that the whole tree is enumerated on every call;
//! there is no pruning beyond stopping at terminal states.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::tictactoe::{Action, BoardState, Player};

/// Value of a position under optimal play, plus the depth it resolves at.
///
/// Ordering is lexicographic on `(score, depth)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    /// +1 X wins, -1 O wins, 0 draw
    pub score: i8,
    /// Plies from the root of the search to the terminal state reached
    pub depth: u8,
}

impl SearchResult {
    pub fn new(score: i8, depth: u8) -> Self {
        SearchResult { score, depth }
    }

    /// Score from the point of view of `player` (positive is good for them)
    fn relative_score(self, player: Player) -> i8 {
        match player {
            Player::X => self.score,
            Player::O => -self.score,
        }
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, depth {})", self.score, self.depth)
    }
}

/// How positions with equal scores are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Inside the tree the first action with the best score wins regardless
    /// of depth. At the root, equal scores are ranked by smaller depth, then
    /// by action order.
    #[default]
    ActionOrder,
    /// At every level the mover takes the shallowest win and the deepest
    /// loss. Draws fall back to action order.
    Depth,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TieBreak::ActionOrder => "action-order",
            TieBreak::Depth => "depth",
        };
        f.write_str(label)
    }
}

impl FromStr for TieBreak {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "action-order" | "action_order" | "first" => Ok(TieBreak::ActionOrder),
            "depth" | "fastest" => Ok(TieBreak::Depth),
            _ => Err(crate::Error::ParseTieBreak {
                input: s.to_string(),
                expected: "action-order, depth".to_string(),
            }),
        }
    }
}

/// Counters collected during a single search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Positions visited, terminal ones included
    pub nodes: usize,
    /// Terminal positions reached
    pub leaves: usize,
}

/// The engine's pick for a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub action: Action,
    pub result: SearchResult,
    pub stats: SearchStats,
}

/// Minimax engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minimax {
    tie_break: TieBreak,
}

impl Minimax {
    pub fn new(tie_break: TieBreak) -> Self {
        Minimax { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Score `state` assuming both sides play optimally from here.
    ///
    /// `depth` is the ply count already consumed above `state`; terminal
    /// states return it unchanged and each level below adds one, saturating
    /// at `u8::MAX`.
    pub fn score_state(&self, state: &BoardState, depth: u8) -> SearchResult {
        let mut stats = SearchStats::default();
        self.score_recursive(state, depth, &mut stats)
    }

    fn score_recursive(
        &self,
        state: &BoardState,
        depth: u8,
        stats: &mut SearchStats,
    ) -> SearchResult {
        stats.nodes += 1;

        if let Some(outcome) = state.check_outcome() {
            stats.leaves += 1;
            return SearchResult::new(outcome.value(), depth);
        }

        let mover = state
            .whose_turn()
            .expect("undecided board should have a player to move");
        let child_depth = depth.saturating_add(1);

        let mut best: Option<SearchResult> = None;
        for action in state.legal_actions() {
            let child = state
                .apply_action(action)
                .expect("legal action should apply");
            let result = self.score_recursive(&child, child_depth, stats);
            best = match best {
                Some(incumbent) if !self.prefers(mover, result, incumbent) => Some(incumbent),
                _ => Some(result),
            };
        }

        best.expect("undecided board should have a legal action")
    }

    /// Whether `candidate` beats `incumbent` for `mover` inside the tree
    fn prefers(&self, mover: Player, candidate: SearchResult, incumbent: SearchResult) -> bool {
        let (c, i) = (
            candidate.relative_score(mover),
            incumbent.relative_score(mover),
        );
        if c != i {
            return c > i;
        }

        match self.tie_break {
            TieBreak::ActionOrder => false,
            TieBreak::Depth => Self::prefers_by_depth(c, candidate, incumbent),
        }
    }

    /// Whether `candidate` beats `incumbent` for `mover` among root actions
    fn prefers_at_root(
        &self,
        mover: Player,
        candidate: SearchResult,
        incumbent: SearchResult,
    ) -> bool {
        let (c, i) = (
            candidate.relative_score(mover),
            incumbent.relative_score(mover),
        );
        if c != i {
            return c > i;
        }

        match self.tie_break {
            TieBreak::ActionOrder => candidate.depth < incumbent.depth,
            TieBreak::Depth => Self::prefers_by_depth(c, candidate, incumbent),
        }
    }

    fn prefers_by_depth(relative: i8, candidate: SearchResult, incumbent: SearchResult) -> bool {
        match relative.signum() {
            1 => candidate.depth < incumbent.depth,
            -1 => candidate.depth > incumbent.depth,
            _ => false,
        }
    }

    /// Score every legal action from `state`, in action order.
    ///
    /// Each child is scored at depth 1.
    pub fn evaluate_actions(&self, state: &BoardState) -> Vec<(Action, SearchResult)> {
        let mut stats = SearchStats::default();
        self.evaluate_with_stats(state, &mut stats)
    }

    fn evaluate_with_stats(
        &self,
        state: &BoardState,
        stats: &mut SearchStats,
    ) -> Vec<(Action, SearchResult)> {
        let mut scored = Vec::new();
        for action in state.legal_actions() {
            let child = state
                .apply_action(action)
                .expect("legal action should apply");
            let result = self.score_recursive(&child, 1, stats);
            trace!(%action, %result, "scored action");
            scored.push((action, result));
        }
        scored
    }

    /// Pick the best action for the player to move, with its score.
    ///
    /// O takes the smallest `(score, depth)` pair; X mirrors that with the
    /// largest score and then the smallest depth. Remaining ties go to the
    /// earliest action.
    ///
    /// # Errors
    ///
    /// [`crate::Error::NoValidMoves`] if the board is full and
    /// [`crate::Error::GameOver`] if the game is already decided.
    pub fn decide(&self, state: &BoardState) -> Result<Decision, crate::Error> {
        let Some(mover) = state.whose_turn() else {
            return Err(crate::Error::NoValidMoves);
        };
        if state.check_outcome().is_some() {
            return Err(crate::Error::GameOver);
        }

        let mut stats = SearchStats::default();
        let scored = self.evaluate_with_stats(state, &mut stats);

        let mut best: Option<(Action, SearchResult)> = None;
        for (action, result) in scored {
            best = match best {
                Some((_, incumbent)) if !self.prefers_at_root(mover, result, incumbent) => best,
                _ => Some((action, result)),
            };
        }

        let (action, result) = best.ok_or(crate::Error::NoValidMoves)?;
        debug!(
            %action,
            %result,
            nodes = stats.nodes,
            leaves = stats.leaves,
            tie_break = %self.tie_break,
            "search complete"
        );

        Ok(Decision {
            action,
            result,
            stats,
        })
    }

    /// Pick the best action for the player to move.
    ///
    /// See [`Minimax::decide`] for the selection rule and errors.
    pub fn choose_move(&self, state: &BoardState) -> Result<Action, crate::Error> {
        self.decide(state).map(|decision| decision.action)
    }
}

/// [`Minimax::score_state`] with the default tie-break
pub fn score_state(state: &BoardState, depth: u8) -> SearchResult {
    Minimax::default().score_state(state, depth)
}

/// [`Minimax::choose_move`] with the default tie-break
pub fn choose_move(state: &BoardState) -> Result<Action, crate::Error> {
    Minimax::default().choose_move(state)
}
