//! Terminal rendering of the board and move list

pub mod text_board;

pub use text_board::{render_board, render_history};
