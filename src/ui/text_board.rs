//! Plain-text board and move list rendering for the terminal front end
//!
//! Cells are three characters wide. The selected square is drawn as `[x]`,
//! the origin and destination of the last move as `(x)`.

use std::fmt::Write;

use crate::game::{MoveHistory, MoveRecord, Position, Square};

/// Render the board with rank 8 at the top
pub fn render_board(
    position: &Position,
    selected: Option<Square>,
    last_move: Option<&MoveRecord>,
    glyphs: bool,
) -> String {
    let mut out = String::new();

    for row in 0..8 {
        let _ = write!(out, "{} ", 8 - row);
        for col in 0..8 {
            let Some(square) = Square::from_grid_index(row, col) else {
                continue;
            };
            let symbol = match position.piece_at(square) {
                Some(piece) if glyphs => piece.glyph(),
                Some(piece) => piece.to_char(),
                None => '.',
            };
            let highlighted = last_move.is_some_and(|m| m.from == square || m.to == square);
            let (open, close) = if selected == Some(square) {
                ('[', ']')
            } else if highlighted {
                ('(', ')')
            } else {
                (' ', ' ')
            };
            out.push(open);
            out.push(symbol);
            out.push(close);
        }
        out.push('\n');
    }

    out.push_str("   a  b  c  d  e  f  g  h\n");
    let _ = writeln!(
        out,
        "{} to move, move {}",
        position.side_to_move(),
        position.fullmove_number()
    );
    out
}

/// Render the notation table, one numbered move per line
pub fn render_history(history: &MoveHistory) -> String {
    history
        .rows()
        .iter()
        .map(|row| format!("{}\n", row))
        .collect()
}
