//! Applying accepted moves
//!
//! The executor trusts the verdict it is given and never re-validates. Board
//! invariant violations still surface as `BoardError`.

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError, Position};
use crate::pieces::Color;
use crate::rules::{jump_available, Move, MoveKind};

/// What happens to the turn after a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continuation {
    TurnEnds,
    /// The same piece has another jump and must take it from `from`
    MustContinue { from: Position },
}

/// Apply an accepted move for `color` and report whether the turn continues
pub fn execute(
    board: &mut Board,
    color: Color,
    mv: Move,
    kind: MoveKind,
) -> Result<Continuation, BoardError> {
    if let MoveKind::Jump { captured } = kind {
        check_victim(board, color, captured)?;
    }
    board.apply_relocation(mv.start, mv.end)?;

    let continuation = match kind {
        MoveKind::Simple => {
            promote(board, mv.end)?;
            Continuation::TurnEnds
        }
        MoveKind::Jump { captured } => {
            board.remove(captured)?;
            // Crowning happens before the continuation check
            promote(board, mv.end)?;
            if jump_available(board, mv.end) {
                Continuation::MustContinue { from: mv.end }
            } else {
                Continuation::TurnEnds
            }
        }
    };

    tracing::debug!(?color, %mv, ?kind, ?continuation, "executed move");
    Ok(continuation)
}

/// The captured square must hold a piece of the other color
fn check_victim(board: &Board, color: Color, captured: Position) -> Result<(), BoardError> {
    match board.piece_at(captured)? {
        None => Err(BoardError::EmptySquare(captured)),
        Some(victim) if victim.color == color => Err(BoardError::NotAnOpponent(captured)),
        Some(_) => Ok(()),
    }
}

fn promote(board: &mut Board, pos: Position) -> Result<(), BoardError> {
    if board.promote(pos)? {
        tracing::debug!(%pos, "piece crowned");
    }
    Ok(())
}
