//! Position string decoding
//!
//! A [`Position`] keeps the position string exactly as the move authority sent
//! it and carries the board grid derived from it. The grid is never edited on
//! its own: a new grid only comes from decoding a new string.
//!
//! # Grid layout
//!
//! `grid[0]` is the first rank written in the placement field (rank 8 for a
//! standard string), `grid[row][0]` is file `a`.
//!
//! ```text
//! rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1
//! └ row 0 ┘                        └ row 7 ┘  │ │    │ │ └ full-move number
//!                                             │ │    │ └ half-move clock
//!                                             │ │    └ en-passant target
//!                                             │ └ castling rights
//!                                             └ side to move
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::{NotationError, NotationResult};
use super::types::Square;

/// Standard chess starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceColor::White => f.write_str("White"),
            PieceColor::Black => f.write_str("Black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

/// One of the twelve piece codes of the placement field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: PieceColor,
    pub piece_type: PieceType,
}

impl Piece {
    pub fn new(color: PieceColor, piece_type: PieceType) -> Self {
        Self { color, piece_type }
    }

    /// Decode a placement character; uppercase is White
    pub fn from_char(c: char) -> Option<Self> {
        let piece_type = match c.to_ascii_lowercase() {
            'k' => PieceType::King,
            'q' => PieceType::Queen,
            'r' => PieceType::Rook,
            'b' => PieceType::Bishop,
            'n' => PieceType::Knight,
            'p' => PieceType::Pawn,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        Some(Self { color, piece_type })
    }

    pub fn to_char(self) -> char {
        let c = match self.piece_type {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Rook => 'r',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Pawn => 'p',
        };
        match self.color {
            PieceColor::White => c.to_ascii_uppercase(),
            PieceColor::Black => c,
        }
    }

    /// Unicode chess glyph (U+2654 through U+265F)
    pub fn glyph(self) -> char {
        let offset = match self.piece_type {
            PieceType::King => 0,
            PieceType::Queen => 1,
            PieceType::Rook => 2,
            PieceType::Bishop => 3,
            PieceType::Knight => 4,
            PieceType::Pawn => 5,
        };
        let base = match self.color {
            PieceColor::White => 0x2654,
            PieceColor::Black => 0x265A,
        };
        char::from_u32(base + offset).unwrap_or('?')
    }
}

/// 8x8 placement grid, row 0 is the first rank of the placement field
pub type Grid = [[Option<Piece>; 8]; 8];

/// Decode the placement field of a position string into a grid
///
/// Digits skip that many empty squares and every other character places a
/// piece in the next column. Every rank must cover exactly eight files.
pub fn parse_placement(placement: &str) -> NotationResult<Grid> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(NotationError::RankCount { found: ranks.len() });
    }

    let mut grid: Grid = [[None; 8]; 8];
    for (row, segment) in ranks.iter().enumerate() {
        let rank = 8 - row as u8;
        let mut col = 0usize;
        for character in segment.chars() {
            if let Some(skip) = character.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(NotationError::InvalidPiece { character, rank });
                }
                col += skip as usize;
            } else {
                let piece =
                    Piece::from_char(character).ok_or(NotationError::InvalidPiece { character, rank })?;
                if col < 8 {
                    grid[row][col] = Some(piece);
                }
                col += 1;
            }
            if col > 8 {
                return Err(NotationError::RankWidth { rank, files: col });
            }
        }
        if col != 8 {
            return Err(NotationError::RankWidth { rank, files: col });
        }
    }

    Ok(grid)
}

/// Decoded position string plus the grid derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    fen: String,
    grid: Grid,
    side_to_move: PieceColor,
    castling: String,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Position {
    /// Decode a full position string
    ///
    /// Only the placement field is required; missing trailing fields take
    /// the values of a fresh game (`w - - 0 1`).
    pub fn from_fen(fen: &str) -> NotationResult<Self> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(NotationError::Empty)?;
        let grid = parse_placement(placement)?;

        let side_to_move = match fields.next() {
            None | Some("w") => PieceColor::White,
            Some("b") => PieceColor::Black,
            Some(other) => {
                return Err(NotationError::InvalidSideToMove {
                    text: other.to_string(),
                })
            }
        };

        let castling = fields.next().unwrap_or("-").to_string();

        let en_passant = match fields.next() {
            None | Some("-") => None,
            Some(text) => Some(text.parse::<Square>()?),
        };

        let halfmove_clock = parse_counter(fields.next(), "half-move clock", 0)?;
        let fullmove_number = parse_counter(fields.next(), "full-move number", 1)?;

        Ok(Self {
            fen: fen.to_string(),
            grid,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Standard starting position
    pub fn initial() -> Self {
        Self::from_fen(STARTING_FEN).expect("starting position decodes")
    }

    /// The position string exactly as received
    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let (row, col) = square.grid_index();
        self.grid[row][col]
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.side_to_move
    }

    /// Castling rights as written (`KQkq`, `-`, ...)
    pub fn castling(&self) -> &str {
        &self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Occupied squares in grid order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.grid.iter().enumerate().flat_map(|(row, rank)| {
            rank.iter().enumerate().filter_map(move |(col, cell)| {
                let piece = (*cell)?;
                Some((Square::from_grid_index(row, col)?, piece))
            })
        })
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl FromStr for Position {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

fn parse_counter(field: Option<&str>, name: &'static str, default: u32) -> NotationResult<u32> {
    match field {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| NotationError::InvalidCounter {
            field: name,
            text: text.to_string(),
        }),
    }
}
