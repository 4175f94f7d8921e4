//! Move history ledger
//!
//! Keeps the chronological record of every ply the move authority accepted
//! in the current game. This enables:
//!
//! - **Last-move highlighting**: the renderer marks the origin and
//!   destination of [`MoveHistory::last_move`]
//! - **Notation table**: [`MoveHistory::rows`] pairs plies into numbered
//!   moves (`1. e2-e4 e7-e5`)
//!
//! # Architecture
//!
//! `MoveHistory` stores a `Vec<MoveRecord>` that is only ever appended to.
//! Each record carries the position string that resulted from it and its
//! 1-based half-move index, assigned as `len + 1` at append time.
//!
//! # Integration
//!
//! Appended by [`crate::game::coordinator::MoveCoordinator`] after an accepted
//! response, cleared by [`crate::game::session::GameSession::new_game`].

use std::fmt;

use super::notation::PieceColor;
use super::types::Square;

/// One committed ply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// Position string after this ply
    pub fen: String,
    /// 1-based ply index within the game
    pub half_move: u32,
}

impl MoveRecord {
    /// Full-move number this ply belongs to (plies 1 and 2 are move 1)
    pub fn move_number(&self) -> u32 {
        self.half_move.div_ceil(2)
    }

    /// Side that played this ply, assuming the game started with White to move
    pub fn mover(&self) -> PieceColor {
        if self.half_move % 2 == 1 {
            PieceColor::White
        } else {
            PieceColor::Black
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// A numbered line of the notation table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotationRow<'a> {
    pub number: u32,
    pub white: &'a MoveRecord,
    pub black: Option<&'a MoveRecord>,
}

impl fmt::Display for NotationRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number, self.white)?;
        if let Some(black) = self.black {
            write!(f, " {}", black)?;
        }
        Ok(())
    }
}

/// Complete move history for the current game
///
/// Index 0 = ply 1 (White's first move), index 1 = ply 2 (Black's reply), etc.
#[derive(Debug, Default, Clone)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
}

impl MoveHistory {
    /// Append a ply and return the stored record
    ///
    /// The half-move index is the previous length plus one.
    pub fn append(&mut self, from: Square, to: Square, fen: impl Into<String>) -> &MoveRecord {
        let half_move = self.moves.len() as u32 + 1;
        self.moves.push(MoveRecord {
            from,
            to,
            fen: fen.into(),
            half_move,
        });
        &self.moves[self.moves.len() - 1]
    }

    /// Most recent ply, `None` before the first move
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    /// Number of plies recorded
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Remove every ply (new game)
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Ply by zero-based index
    pub fn get_move(&self, index: usize) -> Option<&MoveRecord> {
        self.moves.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MoveRecord> {
        self.moves.iter()
    }

    /// Plies paired into numbered notation rows
    pub fn rows(&self) -> Vec<NotationRow<'_>> {
        self.moves
            .chunks(2)
            .map(|pair| NotationRow {
                number: pair[0].move_number(),
                white: &pair[0],
                black: pair.get(1),
            })
            .collect()
    }
}
