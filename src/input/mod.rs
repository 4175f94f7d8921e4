//! Input translation
//!
//! - `pointer` - canvas pixel coordinates to board squares

pub mod pointer;

pub use pointer::BoardGeometry;
