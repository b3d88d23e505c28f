//! Checkers Core - Rules engine
//!
//! This crate provides the rules of two-player checkers:
//! - Board storage (8x8, dark squares only) and its mutation primitives
//! - Piece colors and ranks
//! - Move validation with per-piece (or optional global) forced capture
//! - Move execution with capture removal, crowning and multi-jump continuation
//! - Player-facing outcome messages

pub mod board;
pub mod pieces;
pub mod rules;
pub mod executor;
pub mod message;
pub mod ruleset;

// Re-exports for convenient access
pub use board::{Board, BoardError, Grid, Position, BOARD_SIZE, DIAGONALS, render_grid, render_row};
pub use pieces::{Color, Piece, Rank};
pub use rules::{
    any_jump_available, jump_available, legal_moves, validate, validate_with_rules, Move,
    MoveKind, MoveParseError, Rejection, Verdict,
};
pub use executor::{execute, Continuation};
pub use message::{Message, MessageKind};
pub use ruleset::RuleSet;
