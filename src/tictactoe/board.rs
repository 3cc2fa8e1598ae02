//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    game::{Action, GameOutcome},
    lines::WINNING_LINES,
};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '_' | '.' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this cell, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
}

/// Nine cells in row-major order (`index = 3 * row + col`).
///
/// The player to move is never stored; it is derived from the piece counts,
/// with X moving whenever the counts are equal. Successor states are produced
/// by [`BoardState::apply_action`], which leaves the receiver untouched, so a
/// search can branch from a shared ancestor freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    cells: [Cell; 9],
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        BoardState {
            cells: [Cell::Empty; 9],
        }
    }

    /// Build a board from raw cells.
    ///
    /// # Errors
    ///
    /// Returns error if the piece counts could not arise from X-first play.
    pub fn from_cells(cells: [Cell; 9]) -> Result<Self, crate::Error> {
        let count = Self::count_pieces(&cells);
        if count.x != count.o && count.x != count.o + 1 {
            return Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }
        Ok(BoardState { cells })
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace is ignored; the remaining text must hold exactly 9 cell
    /// characters (`X`, `O`, and `_`, `.` or `-` for empty).
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The string does not have exactly 9 non-whitespace characters
    /// - Any character is not a valid cell representation
    /// - The piece counts are invalid for an X-first game
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Self::from_cells(cells)
    }

    fn count_pieces(cells: &[Cell; 9]) -> PieceCount {
        let mut count = PieceCount { x: 0, o: 0 };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    /// All nine cells
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = Self::count_pieces(&self.cells);
        count.x + count.o
    }

    /// Get all empty positions in ascending order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// The player to move, or `None` once all nine cells are filled.
    ///
    /// O moves when X is ahead, X moves otherwise.
    pub fn whose_turn(&self) -> Option<Player> {
        let count = Self::count_pieces(&self.cells);
        if count.x + count.o == 9 {
            None
        } else if count.x > count.o {
            Some(Player::O)
        } else {
            Some(Player::X)
        }
    }

    /// Every placement available to the player to move, in ascending position
    /// order.
    ///
    /// This only looks at empty cells: a won but unfilled board still has
    /// actions. Use [`BoardState::check_outcome`] to detect the end of a game.
    pub fn legal_actions(&self) -> Vec<Action> {
        let Some(player) = self.whose_turn() else {
            return Vec::new();
        };
        self.empty_positions()
            .into_iter()
            .map(|position| Action::new(player, position))
            .collect()
    }

    /// Apply an action and return the successor state.
    ///
    /// # Errors
    ///
    /// Returns error if the position is out of range, the target cell is
    /// occupied, or the action's mark is not the player to move.
    #[must_use = "apply_action returns a new board state; the receiver is unchanged"]
    pub fn apply_action(&self, action: Action) -> Result<BoardState, crate::Error> {
        if action.position >= 9 {
            return Err(crate::Error::InvalidPosition {
                position: action.position,
            });
        }

        if !self.is_empty(action.position) {
            return Err(crate::Error::InvalidMove {
                position: action.position,
            });
        }

        let to_move = self.whose_turn();
        if to_move != Some(action.player) {
            return Err(crate::Error::WrongTurn {
                expected: to_move,
                got: action.player,
            });
        }

        let mut next = *self;
        next.cells[action.position] = action.player.to_cell();
        Ok(next)
    }

    /// Place the mark of the player to move at `pos`.
    #[must_use = "play returns a new board state; the receiver is unchanged"]
    pub fn play(&self, pos: usize) -> Result<BoardState, crate::Error> {
        let player = self.whose_turn().ok_or(crate::Error::GameOver)?;
        self.apply_action(Action::new(player, pos))
    }

    /// Classify the board.
    ///
    /// Lines are checked rows first, then columns, then diagonals; the first
    /// complete line decides the winner. A full board without a line is a
    /// draw, anything else is undecided (`None`).
    pub fn check_outcome(&self) -> Option<GameOutcome> {
        for line in &WINNING_LINES {
            let first = self.cells[line[0]];
            if first != Cell::Empty && line.iter().all(|&idx| self.cells[idx] == first) {
                return first.to_player().map(GameOutcome::Win);
            }
        }

        if self.whose_turn().is_none() {
            return Some(GameOutcome::Draw);
        }

        None
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        match self.check_outcome() {
            Some(GameOutcome::Win(player)) => Some(player),
            _ => None,
        }
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.check_outcome().is_some()
    }

    /// Compact single-line encoding, e.g. `XO_______`
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

/// The empty starting board
pub fn initial_state() -> BoardState {
    BoardState::new()
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) {
                if i < 8 {
                    writeln!(f)?;
                }
            } else {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}
