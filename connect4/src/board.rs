//! Board state with incremental move validation and localized win detection.
//!
//! Columns are indexed left to right from 0, rows bottom to top from 0. A
//! piece dropped into a column lands on row `column_fill(column)`.
use std::fmt;

use crate::error::GameError;

pub const WIDTH: usize = 7;
pub const HEIGHT: usize = 6;
pub const MAX_MOVES: usize = WIDTH * HEIGHT;

/// Neighbours in line with the landing cell that make four in a row.
const WIN_NEIGHBOURS: usize = 3;
/// Neighbours in line with the landing cell that make three in a row.
const THREAT_NEIGHBOURS: usize = 2;

/// Vertical steps paired with a horizontal step of +/-1: falling diagonal,
/// horizontal, rising diagonal.
const LINE_SLOPES: [isize; 3] = [-1, 0, 1];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Piece {
    X,
    O,
}

impl Piece {
    pub fn opponent(self) -> Piece {
        match self {
            Piece::X => Piece::O,
            Piece::O => Piece::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Piece::X => 'X',
            Piece::O => 'O',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Result of a finished round. Only meaningful once the board is terminal.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Winner {
    Piece(Piece),
    #[default]
    Tie,
}

/// Outcome of [`Board::validate_move`], checked in declaration order after
/// `Valid`: round over, column range, column full.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MoveValidation {
    Valid,
    InvalidColumnRange,
    ColumnFull,
    RoundAlreadyOver,
}

impl MoveValidation {
    pub fn is_valid(self) -> bool {
        self == MoveValidation::Valid
    }
}

impl fmt::Display for MoveValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MoveValidation::Valid => "move is valid",
            MoveValidation::InvalidColumnRange => "column is out of range",
            MoveValidation::ColumnFull => "column is full",
            MoveValidation::RoundAlreadyOver => "round is already over",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece: Piece,
    pub column: usize,
    pub row: usize,
    pub won: bool,
}

/// A Connect 4 position. Cloning produces a fully independent copy, which is
/// how the search explores continuations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; HEIGHT]; WIDTH],
    column_fill: [usize; WIDTH],
    move_count: usize,
    history: Vec<usize>,
    terminal: bool,
    winner: Winner,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            grid: [[None; HEIGHT]; WIDTH],
            column_fill: [0; WIDTH],
            move_count: 0,
            history: Vec::with_capacity(MAX_MOVES),
            terminal: false,
            winner: Winner::Tie,
        }
    }

    /// Replays a sequence of columns, alternating pieces starting with `X`.
    pub fn from_history(columns: &[usize]) -> Result<Self, GameError> {
        let mut board = Self::new();
        for (index, &column) in columns.iter().enumerate() {
            let reason = board.validate_move(column);
            if !reason.is_valid() {
                return Err(GameError::IllegalMove {
                    index,
                    column,
                    reason,
                });
            }
            board.apply_move(board.next_to_move(), column);
        }
        Ok(board)
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<Piece> {
        self.grid[column][row]
    }

    pub fn column_fill(&self, column: usize) -> usize {
        self.column_fill[column]
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Columns played so far, oldest first.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn winner(&self) -> Winner {
        self.winner
    }

    pub fn next_to_move(&self) -> Piece {
        if self.move_count % 2 == 0 {
            Piece::X
        } else {
            Piece::O
        }
    }

    /// Columns that currently accept a piece, in ascending order.
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..WIDTH)
            .filter(|&column| self.validate_move(column).is_valid())
            .collect()
    }

    pub fn validate_move(&self, column: usize) -> MoveValidation {
        if self.terminal {
            MoveValidation::RoundAlreadyOver
        } else if column >= WIDTH {
            MoveValidation::InvalidColumnRange
        } else if self.column_fill[column] >= HEIGHT {
            MoveValidation::ColumnFull
        } else {
            MoveValidation::Valid
        }
    }

    /// Drops `piece` into `column` and updates the terminal status.
    ///
    /// # Panics
    ///
    /// Panics unless `validate_move(column)` is `Valid`.
    pub fn apply_move(&mut self, piece: Piece, column: usize) -> MoveOutcome {
        let validation = self.validate_move(column);
        assert!(
            validation.is_valid(),
            "apply_move on column {column}: {validation}"
        );

        let row = self.column_fill[column];
        let won = self.is_winning_move(piece, column);

        self.grid[column][row] = Some(piece);
        self.column_fill[column] += 1;
        self.move_count += 1;
        self.history.push(column);

        if won {
            self.terminal = true;
            self.winner = Winner::Piece(piece);
        } else if self.move_count == MAX_MOVES {
            self.terminal = true;
            self.winner = Winner::Tie;
        }

        MoveOutcome {
            piece,
            column,
            row,
            won,
        }
    }

    /// Validates and applies a move for the side to move.
    pub fn play(&mut self, column: usize) -> Result<MoveOutcome, GameError> {
        let reason = self.validate_move(column);
        if !reason.is_valid() {
            return Err(GameError::IllegalMove {
                index: self.move_count,
                column,
                reason,
            });
        }
        Ok(self.apply_move(self.next_to_move(), column))
    }

    /// Whether dropping `piece` into `column` would complete four in a row.
    /// Reasons about the landing cell before anything is placed.
    pub fn is_winning_move(&self, piece: Piece, column: usize) -> bool {
        self.connects(piece, column, WIN_NEIGHBOURS)
    }

    /// Whether dropping `piece` into `column` would complete three in a row.
    pub fn is_almost_winning_move(&self, piece: Piece, column: usize) -> bool {
        self.connects(piece, column, THREAT_NEIGHBOURS)
    }

    fn connects(&self, piece: Piece, column: usize, neighbours: usize) -> bool {
        if column >= WIDTH || self.column_fill[column] >= HEIGHT {
            return false;
        }
        let row = self.column_fill[column];

        // Vertical: only the cells below can already be filled.
        if row >= neighbours
            && (1..=neighbours).all(|offset| self.grid[column][row - offset] == Some(piece))
        {
            return true;
        }

        LINE_SLOPES.iter().any(|&slope| {
            let count = self.run_length(piece, column, row, -1, -slope)
                + self.run_length(piece, column, row, 1, slope);
            count >= neighbours
        })
    }

    /// Consecutive `piece` cells walking away from `(column, row)`, not
    /// counting the start cell.
    fn run_length(
        &self,
        piece: Piece,
        column: usize,
        row: usize,
        column_step: isize,
        row_step: isize,
    ) -> usize {
        let mut count = 0;
        let mut c = column as isize + column_step;
        let mut r = row as isize + row_step;
        while (0..WIDTH as isize).contains(&c)
            && (0..HEIGHT as isize).contains(&r)
            && self.grid[c as usize][r as usize] == Some(piece)
        {
            count += 1;
            c += column_step;
            r += row_step;
        }
        count
    }

    /// Text grid with the top row first, each cell bracketed, followed by a
    /// 1-based column footer and a blank line.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((WIDTH * 3 + 1) * (HEIGHT + 1) + 2);
        for row in (0..HEIGHT).rev() {
            for column in 0..WIDTH {
                let symbol = self.grid[column][row].map_or(' ', Piece::symbol);
                out.push('[');
                out.push(symbol);
                out.push(']');
            }
            out.push('\n');
        }
        out.push(' ');
        for column in 0..WIDTH {
            out.push_str(&format!("{}  ", column + 1));
        }
        out.push_str("\n\n");
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
