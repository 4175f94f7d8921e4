//! Wire messages exchanged with the move authority
//!
//! Both endpoints answer with a [`MoveResponse`]. On success it carries the
//! position after the move, the move itself and the game result; on
//! rejection only `successful: false` is guaranteed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::Square;

/// Game result reported alongside an accepted move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameOutcome {
    #[default]
    Ongoing,
    WhiteWins,
    BlackWins,
    #[serde(alias = "stalemate")]
    Draw,
}

impl GameOutcome {
    /// Whether the game ended with this result
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::Ongoing)
    }

    /// Text shown to the player when the game ends
    pub fn message(self) -> &'static str {
        match self {
            GameOutcome::Ongoing => "Game in progress",
            GameOutcome::WhiteWins => "White wins",
            GameOutcome::BlackWins => "Black wins",
            GameOutcome::Draw => "Draw",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Body of the submit-move call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitMoveRequest {
    pub from: Square,
    pub to: Square,
    pub fen: String,
}

/// Body of the request-reply call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReplyRequest {
    pub fen: String,
}

/// Answer to either call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub successful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    #[serde(default)]
    pub result: GameOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Square>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Square>,
}

impl MoveResponse {
    /// Accepted move with the resulting position
    pub fn accepted(from: Square, to: Square, fen: impl Into<String>, result: GameOutcome) -> Self {
        Self {
            successful: true,
            fen: Some(fen.into()),
            result,
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn rejected() -> Self {
        Self {
            successful: false,
            fen: None,
            result: GameOutcome::Ongoing,
            from: None,
            to: None,
        }
    }
}
