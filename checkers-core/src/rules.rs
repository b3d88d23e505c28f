//! Move validation
//!
//! `validate` decides whether one move is legal for one color on one board and
//! classifies it. It never writes to the board; applying an accepted move is
//! the executor's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Position, DIAGONALS};
use crate::pieces::{Color, Piece};
use crate::ruleset::RuleSet;

// ============================================================================
// TYPES
// ============================================================================

/// A proposed relocation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub start: Position,
    pub end: Position,
}

impl Move {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    fn row_delta(&self) -> i8 {
        self.end.row - self.start.row
    }

    fn cell_delta(&self) -> i8 {
        self.end.cell - self.start.cell
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Failure to read a move from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("expected four numbers (start row, start cell, end row, end cell), got {0}")]
    WrongArity(usize),

    #[error("not a coordinate: {0:?}")]
    BadNumber(String),
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parse "row cell row cell"; commas are treated as spaces
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .collect();
        if parts.len() != 4 {
            return Err(MoveParseError::WrongArity(parts.len()));
        }
        let mut coords = [0i8; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| MoveParseError::BadNumber(part.to_string()))?;
        }
        Ok(Move::new(
            Position::new(coords[0], coords[1]),
            Position::new(coords[2], coords[3]),
        ))
    }
}

/// Kind of an accepted move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Simple,
    Jump { captured: Position },
}

/// Why a move was refused. The display text is shown to players as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum Rejection {
    #[error("That position is off the board!")]
    OutOfBounds,

    #[error("There is no piece there!")]
    EmptySource,

    #[error("That is not your piece!")]
    WrongOwner,

    #[error("That space is already occupied!")]
    DestinationOccupied,

    #[error("Pieces may only move onto dark squares!")]
    IllegalSquare,

    #[error("That piece cannot move that way!")]
    IllegalShape,

    #[error("Jump required!")]
    JumpRequired,

    #[error("There is no piece to jump over!")]
    NoPieceToCapture,

    #[error("You cannot capture your own piece!")]
    CannotCaptureOwnPiece,

    /// Reached only if the checks above miss a case
    #[error("Move could not be resolved.")]
    Unresolved,
}

/// Outcome of validating a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Accepted(MoveKind),
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Validate under the default rules (per-piece forced capture)
pub fn validate(board: &Board, color: Color, mv: Move) -> Verdict {
    validate_with_rules(board, color, mv, &RuleSet::default())
}

/// Validate a move for `color`, stopping at the first failed check
pub fn validate_with_rules(board: &Board, color: Color, mv: Move, rules: &RuleSet) -> Verdict {
    let verdict = match check_move(board, color, mv, rules) {
        Ok(kind) => Verdict::Accepted(kind),
        Err(Rejection::Unresolved) => {
            tracing::error!("unresolved move {} for {:?}", mv, color);
            Verdict::Rejected(Rejection::Unresolved)
        }
        Err(reason) => Verdict::Rejected(reason),
    };
    tracing::trace!(?color, %mv, ?verdict, "validated move");
    verdict
}

fn check_move(board: &Board, color: Color, mv: Move, rules: &RuleSet) -> Result<MoveKind, Rejection> {
    if !mv.start.is_on_board() || !mv.end.is_on_board() {
        return Err(Rejection::OutOfBounds);
    }

    let piece = occupant(board, mv.start).ok_or(Rejection::EmptySource)?;
    if piece.color != color {
        return Err(Rejection::WrongOwner);
    }

    if occupant(board, mv.end).is_some() {
        return Err(Rejection::DestinationOccupied);
    }

    if !mv.end.is_dark() {
        return Err(Rejection::IllegalSquare);
    }

    let d_row = mv.row_delta();
    let distance = d_row.abs();
    let diagonal = mv.cell_delta().abs() == distance;
    let permitted = piece.row_directions().contains(&d_row.signum());
    if !diagonal || !permitted || !(1..=2).contains(&distance) {
        return Err(Rejection::IllegalShape);
    }

    match distance {
        1 => {
            if jump_available(board, mv.start) {
                return Err(Rejection::JumpRequired);
            }
            if rules.global_forced_capture && any_jump_available(board, color) {
                return Err(Rejection::JumpRequired);
            }
            Ok(MoveKind::Simple)
        }
        2 => {
            let captured = mv.start.midpoint(mv.end);
            match occupant(board, captured) {
                None => Err(Rejection::NoPieceToCapture),
                Some(victim) if victim.color == color => Err(Rejection::CannotCaptureOwnPiece),
                Some(_) => Ok(MoveKind::Jump { captured }),
            }
        }
        _ => Err(Rejection::Unresolved),
    }
}

// ============================================================================
// JUMP DETECTION
// ============================================================================

/// Can the piece on `from` capture something right now?
///
/// Looks at most at the four diagonal neighbours, restricted to the
/// directions the piece's rank allows. Empty or off-board squares have no jump.
pub fn jump_available(board: &Board, from: Position) -> bool {
    match occupant(board, from) {
        Some(piece) => !jumps_from(board, from, piece).is_empty(),
        None => false,
    }
}

/// Can any piece of `color` capture something right now?
pub fn any_jump_available(board: &Board, color: Color) -> bool {
    board
        .pieces()
        .any(|(pos, piece)| piece.color == color && !jumps_from(board, pos, piece).is_empty())
}

/// Landing squares of every jump open to `piece` standing on `from`
fn jumps_from(board: &Board, from: Position, piece: Piece) -> Vec<Position> {
    DIAGONALS
        .iter()
        .filter(|(d_row, _)| piece.row_directions().contains(d_row))
        .filter_map(|&(d_row, d_cell)| {
            let over = from.offset(d_row, d_cell);
            let land = from.offset(2 * d_row, 2 * d_cell);
            if !land.is_on_board() || occupant(board, land).is_some() {
                return None;
            }
            match occupant(board, over) {
                Some(victim) if victim.color != piece.color => Some(land),
                _ => None,
            }
        })
        .collect()
}

// ============================================================================
// MOVE GENERATION
// ============================================================================

/// Every move `color` could legally make
pub fn legal_moves(board: &Board, color: Color, rules: &RuleSet) -> Vec<(Move, MoveKind)> {
    let mut moves = Vec::new();
    for (start, piece) in board.pieces() {
        if piece.color != color {
            continue;
        }
        for &(d_row, d_cell) in &DIAGONALS {
            for distance in 1..=2 {
                let end = start.offset(d_row * distance, d_cell * distance);
                let mv = Move::new(start, end);
                if let Verdict::Accepted(kind) = validate_with_rules(board, color, mv, rules) {
                    moves.push((mv, kind));
                }
            }
        }
    }
    moves
}

/// Occupant of an on-board square; off-board squares read as empty
fn occupant(board: &Board, pos: Position) -> Option<Piece> {
    board.piece_at(pos).ok().flatten()
}
