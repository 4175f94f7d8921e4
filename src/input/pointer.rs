//! Pixel to square translation for canvas clicks
//!
//! The board is drawn inside a square canvas with a border on every side.
//! The playing area is split into 8x8 equal squares, rank 8 at the top and
//! file `a` on the left.
//!
//! # Mapping
//!
//! ```text
//! size = (canvas - 2 * border) / 8
//! col  = ceil((x - border) / size)      1..=8
//! row  = ceil((y - border) / size)      1..=8
//! file = 'a' + col - 1
//! rank = 9 - row
//! ```
//!
//! A point on the border or outside the canvas maps to no square.

use crate::game::{File, Rank, Square};

/// Canvas layout used to translate clicks into squares
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    border: f32,
    square_size: f32,
}

impl BoardGeometry {
    /// Geometry for a square canvas of `canvas_size` pixels with `border` on each side
    pub fn new(canvas_size: f32, border: f32) -> Self {
        Self {
            border,
            square_size: (canvas_size - border * 2.0) / 8.0,
        }
    }

    pub fn square_size(&self) -> f32 {
        self.square_size
    }

    pub fn border(&self) -> f32 {
        self.border
    }

    /// Square under the canvas-relative point `(x, y)`
    pub fn square_at(&self, x: f32, y: f32) -> Option<Square> {
        let col = self.cell(x)?;
        let row = self.cell(y)?;

        let file = File::new(col - 1)?;
        let rank = Rank::from_number(9 - row)?;
        Some(Square::new(file, rank))
    }

    /// Top-left pixel of `square`, for highlight drawing
    pub fn square_origin(&self, square: Square) -> (f32, f32) {
        let (row, col) = square.grid_index();
        (
            self.border + self.square_size * col as f32,
            self.border + self.square_size * row as f32,
        )
    }

    fn cell(&self, coordinate: f32) -> Option<u8> {
        if self.square_size <= 0.0 || !coordinate.is_finite() {
            return None;
        }
        let cell = ((coordinate - self.border) / self.square_size).ceil();
        if (1.0..=8.0).contains(&cell) {
            Some(cell as u8)
        } else {
            None
        }
    }
}
