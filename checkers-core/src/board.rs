//! Board geometry and grid storage
//!
//! The grid is row-major with row 0 at White's back rank and row 7 at Red's.
//! Only dark squares (row + cell odd) ever hold a piece.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pieces::{Color, Piece};

/// Board width and height
pub const BOARD_SIZE: i8 = 8;

/// Rows filled with men at the start of a game, per side
const STARTING_ROWS: i8 = 3;

/// Diagonal direction vectors (row delta, cell delta)
pub const DIAGONALS: [(i8, i8); 4] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Copy of the full grid handed out for rendering
pub type Grid = [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// Board square
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub cell: i8,
}

impl Position {
    pub const fn new(row: i8, cell: i8) -> Self {
        Self { row, cell }
    }

    /// Check if this square is on the board
    pub fn is_on_board(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.cell)
    }

    /// Playable square
    pub fn is_dark(&self) -> bool {
        (self.row + self.cell).rem_euclid(2) == 1
    }

    pub fn offset(&self, d_row: i8, d_cell: i8) -> Position {
        Position::new(self.row + d_row, self.cell + d_cell)
    }

    /// Square halfway between two squares two diagonals apart
    pub fn midpoint(&self, other: Position) -> Position {
        Position::new((self.row + other.row) / 2, (self.cell + other.cell) / 2)
    }

    /// Same square seen from the other side of the table
    pub fn rotated(&self) -> Position {
        Position::new(BOARD_SIZE - 1 - self.row, BOARD_SIZE - 1 - self.cell)
    }

    fn index(&self) -> (usize, usize) {
        (self.row as usize, self.cell as usize)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.cell)
    }
}

/// Broken board invariants. These are defects, not illegal moves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position {0} is off the board")]
    OutOfBounds(Position),

    #[error("position {0} is a light square")]
    LightSquare(Position),

    #[error("position {0} is already occupied")]
    SquareOccupied(Position),

    #[error("position {0} holds no piece")]
    EmptySquare(Position),

    #[error("position {0} does not hold an opposing piece")]
    NotAnOpponent(Position),
}

/// 8x8 checkers board
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    squares: Grid,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Board with no pieces
    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Standard opening layout: White on rows 0-2, Red on rows 5-7
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE {
            let color = if row < STARTING_ROWS {
                Color::White
            } else if row >= BOARD_SIZE - STARTING_ROWS {
                Color::Red
            } else {
                continue;
            };
            for cell in 0..BOARD_SIZE {
                let pos = Position::new(row, cell);
                if pos.is_dark() {
                    board.set(pos, Some(Piece::man(color)));
                }
            }
        }
        board
    }

    /// Put a piece on an empty dark square
    pub fn place(&mut self, pos: Position, piece: Piece) -> Result<(), BoardError> {
        Self::check_dark(pos)?;
        if self.get(pos).is_some() {
            return Err(BoardError::SquareOccupied(pos));
        }
        self.set(pos, Some(piece));
        Ok(())
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Get piece at position
    pub fn piece_at(&self, pos: Position) -> Result<Option<Piece>, BoardError> {
        Self::check_bounds(pos)?;
        Ok(self.get(pos))
    }

    /// Iterate occupied squares
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(cell, slot)| {
                slot.map(|piece| (Position::new(row as i8, cell as i8), piece))
            })
        })
    }

    /// Number of pieces of one color
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, piece)| piece.color == color).count()
    }

    /// Grid as stored
    pub fn snapshot(&self) -> Grid {
        self.squares
    }

    /// Grid turned 180 degrees
    pub fn rotated(&self) -> Grid {
        let mut grid = self.squares;
        for row in grid.iter_mut() {
            row.reverse();
        }
        grid.reverse();
        grid
    }

    /// Grid oriented so `color`'s back rank is the last row
    pub fn view_for(&self, color: Color) -> Grid {
        match color {
            Color::Red => self.snapshot(),
            Color::White => self.rotated(),
        }
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Move whatever sits on `start` to `end`. No rule checking happens here.
    pub fn apply_relocation(&mut self, start: Position, end: Position) -> Result<(), BoardError> {
        Self::check_bounds(start)?;
        Self::check_dark(end)?;
        let piece = self.get(start).ok_or(BoardError::EmptySquare(start))?;
        if self.get(end).is_some() {
            return Err(BoardError::SquareOccupied(end));
        }
        self.set(end, Some(piece));
        self.set(start, None);
        Ok(())
    }

    /// Clear a square, returning what was there
    pub fn remove(&mut self, pos: Position) -> Result<Option<Piece>, BoardError> {
        Self::check_bounds(pos)?;
        let removed = self.get(pos);
        self.set(pos, None);
        Ok(removed)
    }

    /// Crown a man standing on its promotion row. Returns true if it was crowned.
    pub fn promote(&mut self, pos: Position) -> Result<bool, BoardError> {
        match self.piece_at(pos)? {
            Some(piece) if !piece.is_king() && pos.row == piece.color.promotion_row() => {
                self.set(pos, Some(piece.crowned()));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn get(&self, pos: Position) -> Option<Piece> {
        let (row, cell) = pos.index();
        self.squares[row][cell]
    }

    fn set(&mut self, pos: Position, slot: Option<Piece>) {
        let (row, cell) = pos.index();
        self.squares[row][cell] = slot;
    }

    fn check_bounds(pos: Position) -> Result<(), BoardError> {
        if pos.is_on_board() {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds(pos))
        }
    }

    fn check_dark(pos: Position) -> Result<(), BoardError> {
        Self::check_bounds(pos)?;
        if pos.is_dark() {
            Ok(())
        } else {
            Err(BoardError::LightSquare(pos))
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// Render a grid one row per line, `[ ]` for empty squares
pub fn render_grid(grid: &Grid) -> String {
    let mut out = String::new();
    for row in grid {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

/// One row of cells, `[x]` per square, without a line break
pub fn render_row(cells: &[Option<Piece>]) -> String {
    let mut out = String::with_capacity(cells.len() * 3);
    for slot in cells {
        match slot {
            Some(piece) => {
                out.push('[');
                out.push(piece.symbol());
                out.push(']');
            }
            None => out.push_str("[ ]"),
        }
    }
    out
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_grid(&self.squares))
    }
}
