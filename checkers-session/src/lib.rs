//! Checkers Session - Registry of running games
//!
//! This crate provides the bookkeeping around the rules engine:
//! - One board per game, keyed by game id
//! - Turn ownership and multi-jump continuation
//! - Win detection when a side has no pieces or no moves left

mod registry;
mod session;

pub use registry::{GameRegistry, SharedSession};
pub use session::{GameId, GameResult, GameSession, SessionError};
