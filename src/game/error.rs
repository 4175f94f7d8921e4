//! Error types for game module
//!
//! Provides custom error types for position decoding and session control.

/// Errors produced while decoding a position string or a square name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    /// Position string has no placement field
    #[error("Position string is empty")]
    Empty,

    /// Placement field does not describe eight ranks
    #[error("Expected 8 ranks in placement field, found {found}")]
    RankCount { found: usize },

    /// A rank does not cover exactly eight files
    #[error("Rank {rank} covers {files} files, expected 8")]
    RankWidth { rank: u8, files: usize },

    /// Character that is neither a piece code nor a skip digit
    #[error("Invalid placement character '{character}' in rank {rank}")]
    InvalidPiece { character: char, rank: u8 },

    /// Side-to-move field other than `w` or `b`
    #[error("Invalid side to move: {text}")]
    InvalidSideToMove { text: String },

    /// Unparseable square name
    #[error("Invalid square: {text}")]
    InvalidSquare { text: String },

    /// Half-move clock or full-move number is not a non-negative integer
    #[error("Invalid {field}: {text}")]
    InvalidCounter { field: &'static str, text: String },
}

/// Result type alias for notation decoding
pub type NotationResult<T> = Result<T, NotationError>;

/// Errors from session-level operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Operation needs the in-flight move sequence to finish first
    #[error("A move is still in flight")]
    MoveInFlight,

    /// Requested starting position does not decode
    #[error("Invalid starting position: {0}")]
    InvalidPosition(#[from] NotationError),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
