//! Outcome messages forwarded to players

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::pieces::Color;
use crate::rules::Rejection;

/// Message tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageKind {
    Info,
    Error,
}

/// Tagged text for the presentation layer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Error, text: text.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }

    pub fn turn_ends(next: Color) -> Self {
        Self::info(format!("Move accepted. {} to move.", color_name(next)))
    }

    pub fn must_continue(from: Position) -> Self {
        Self::info(format!("Jump again from {}!", from))
    }

    pub fn game_won(winner: Color) -> Self {
        Self::info(format!("{} wins!", color_name(winner)))
    }
}

impl From<Rejection> for Message {
    fn from(reason: Rejection) -> Self {
        Self::error(reason.to_string())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MessageKind::Info => write!(f, "INFO: {}", self.text),
            MessageKind::Error => write!(f, "ERROR: {}", self.text),
        }
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::Red => "Red",
        Color::White => "White",
    }
}
