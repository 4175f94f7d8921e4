//! Square selection state machine
//!
//! ```text
//! Empty       --click occupied-->  Selected(s)
//! Empty       --click empty---->   Empty            (no change)
//! Selected(s) --click s-------->   Empty
//! Selected(s) --click t-------->   Empty + move attempt (s, t)
//! ```
//!
//! The destination of a move attempt is never checked here, legality
//! belongs to the move authority.

use super::types::Square;

/// Currently selected square, if any
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Empty,
    Selected(Square),
}

/// What a click did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Nothing was selected and the clicked square was empty
    Unchanged,
    Selected(Square),
    /// The selected square was clicked again
    Deselected(Square),
    /// A second square was clicked while one was selected
    MoveAttempt { from: Square, to: Square },
}

impl Selection {
    /// Apply a click; `occupied` is whether `square` holds a piece right now
    pub fn click(&mut self, square: Square, occupied: bool) -> SelectionChange {
        match *self {
            Selection::Selected(selected) if selected == square => {
                *self = Selection::Empty;
                SelectionChange::Deselected(selected)
            }
            Selection::Selected(selected) => {
                *self = Selection::Empty;
                SelectionChange::MoveAttempt {
                    from: selected,
                    to: square,
                }
            }
            Selection::Empty if occupied => {
                *self = Selection::Selected(square);
                SelectionChange::Selected(square)
            }
            Selection::Empty => SelectionChange::Unchanged,
        }
    }

    pub fn clear(&mut self) -> Option<Square> {
        match std::mem::take(self) {
            Selection::Selected(square) => Some(square),
            Selection::Empty => None,
        }
    }

    pub fn square(&self) -> Option<Square> {
        match self {
            Selection::Selected(square) => Some(*square),
            Selection::Empty => None,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }
}
