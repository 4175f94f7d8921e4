//! Board state, selection and move submission
//!
//! # Architecture
//!
//! - `types` - files, ranks and squares
//! - `notation` - position string decoding into a board grid
//! - `selection` - `Empty | Selected` click state machine
//! - `history` - append-only ledger of accepted plies
//! - `events` - session-owned event bus for the rendering layer
//! - `coordinator` - in-flight guard, submit/reply exchange with the move authority
//! - `session` - one game: clicks in, events out

pub mod coordinator;
pub mod error;
pub mod events;
pub mod history;
pub mod notation;
pub mod selection;
pub mod session;
pub mod types;

pub use coordinator::{MoveCoordinator, MoveOutcome, MovePhase};
pub use error::{NotationError, NotationResult, SessionError, SessionResult};
pub use events::{BoardEvent, EventBus, EventKind, SubscriptionId};
pub use history::{MoveHistory, MoveRecord, NotationRow};
pub use notation::{parse_placement, Grid, Piece, PieceColor, PieceType, Position, STARTING_FEN};
pub use selection::{Selection, SelectionChange};
pub use session::{ClickOutcome, GameSession};
pub use types::{File, Rank, Square};
