pub mod core;
pub mod game;
pub mod input;
pub mod networking;
pub mod ui;

pub use game::{BoardEvent, EventBus, GameSession, MoveOutcome, Position, Square, STARTING_FEN};
pub use networking::{GameOutcome, HttpMoveAuthority, MoveAuthority};
