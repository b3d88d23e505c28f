//! Piece definitions

use serde::{Deserialize, Serialize};

use crate::board::BOARD_SIZE;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::White,
            Color::White => Color::Red,
        }
    }

    /// Row delta of a forward step. Red starts on rows 5-7 and heads for row 0.
    pub fn forward(self) -> i8 {
        match self {
            Color::Red => -1,
            Color::White => 1,
        }
    }

    /// Row on which a man of this color is crowned
    pub fn promotion_row(self) -> i8 {
        match self {
            Color::Red => 0,
            Color::White => BOARD_SIZE - 1,
        }
    }
}

/// Piece rank
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Man,
    King,
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Self { color, rank: Rank::Man }
    }

    pub const fn king(color: Color) -> Self {
        Self { color, rank: Rank::King }
    }

    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    /// The same piece after crowning
    pub fn crowned(self) -> Self {
        Self::king(self.color)
    }

    /// Row directions this piece may travel in
    pub fn row_directions(&self) -> &'static [i8] {
        match (self.rank, self.color) {
            (Rank::King, _) => &[-1, 1],
            (Rank::Man, Color::Red) => &[-1],
            (Rank::Man, Color::White) => &[1],
        }
    }

    /// Single character used when rendering boards
    pub fn symbol(&self) -> char {
        match (self.color, self.rank) {
            (Color::Red, Rank::Man) => 'r',
            (Color::Red, Rank::King) => 'R',
            (Color::White, Rank::Man) => 'w',
            (Color::White, Rank::King) => 'W',
        }
    }
}
