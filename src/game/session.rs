//! One game against the move authority
//!
//! [`GameSession`] wires the selection state machine to the move
//! coordinator and publishes selection changes on the session's bus. It is
//! the handle the front end talks to: clicks go in, [`BoardEvent`]s come out.
//!
//! [`BoardEvent`]: super::events::BoardEvent

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::coordinator::{MoveCoordinator, MoveOutcome, MovePhase};
use super::error::SessionResult;
use super::events::{BoardEvent, EventBus};
use super::history::{MoveHistory, MoveRecord};
use super::notation::{Piece, Position};
use super::selection::{Selection, SelectionChange};
use super::types::Square;
use crate::core::ClientSettings;
use crate::input::BoardGeometry;
use crate::networking::{GameOutcome, MoveAuthority};

/// What a click ended up doing
#[derive(Debug)]
pub enum ClickOutcome {
    /// Empty square with nothing selected, or a click off the board
    Ignored,
    Selected(Square),
    Deselected(Square),
    /// A move was attempted from the previously selected square
    Move(MoveOutcome),
}

/// Selection, position and history for one game
#[derive(Clone)]
pub struct GameSession {
    coordinator: MoveCoordinator,
    selection: Arc<Mutex<Selection>>,
    bus: EventBus,
    geometry: BoardGeometry,
}

impl GameSession {
    /// New game from the standard starting position
    pub fn new(authority: Arc<dyn MoveAuthority>, bus: EventBus) -> Self {
        Self {
            coordinator: MoveCoordinator::new(authority, bus.clone()),
            selection: Arc::new(Mutex::new(Selection::default())),
            bus,
            geometry: ClientSettings::default().geometry(),
        }
    }

    pub fn with_geometry(mut self, geometry: BoardGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Apply a click to the selection and publish the change
    ///
    /// Synchronous, so callers that read clicks from a stream can apply them
    /// strictly in arrival order and spawn only the resulting move attempt.
    pub fn select(&self, square: Square) -> SelectionChange {
        let occupied = self.coordinator.piece_at(square).is_some();
        let change = self.selection.lock().click(square, occupied);

        match change {
            SelectionChange::Unchanged => {}
            SelectionChange::Selected(square) => {
                debug!("[SESSION] Selected {}", square);
                self.bus.publish(&BoardEvent::SquareSelected(square));
            }
            SelectionChange::Deselected(square) => {
                debug!("[SESSION] Deselected {}", square);
                self.bus.publish(&BoardEvent::SquareDeselected);
            }
            SelectionChange::MoveAttempt { from, to } => {
                info!("[SESSION] Attempting move from {} to {}", from, to);
                self.bus.publish(&BoardEvent::SquareDeselected);
            }
        }
        change
    }

    /// [`GameSession::select`] for a canvas pixel; off-board clicks leave the selection alone
    pub fn select_at(&self, x: f32, y: f32) -> SelectionChange {
        match self.geometry.square_at(x, y) {
            Some(square) => self.select(square),
            None => {
                debug!("[SESSION] Click at ({}, {}) is off the board", x, y);
                SelectionChange::Unchanged
            }
        }
    }

    /// Handle a click on `square`
    ///
    /// A move attempt clears the selection before the move is submitted,
    /// whether or not the attempt goes anywhere.
    pub async fn click(&self, square: Square) -> ClickOutcome {
        self.finish_click(self.select(square)).await
    }

    /// Handle a click at canvas pixel `(x, y)`
    pub async fn click_at(&self, x: f32, y: f32) -> ClickOutcome {
        self.finish_click(self.select_at(x, y)).await
    }

    async fn finish_click(&self, change: SelectionChange) -> ClickOutcome {
        match change {
            SelectionChange::Unchanged => ClickOutcome::Ignored,
            SelectionChange::Selected(square) => ClickOutcome::Selected(square),
            SelectionChange::Deselected(square) => ClickOutcome::Deselected(square),
            SelectionChange::MoveAttempt { from, to } => {
                ClickOutcome::Move(self.coordinator.attempt_move(from, to).await)
            }
        }
    }

    /// Submit a move directly, bypassing selection
    pub async fn attempt_move(&self, from: Square, to: Square) -> MoveOutcome {
        self.coordinator.attempt_move(from, to).await
    }

    /// Start a new game from the standard position
    pub fn new_game(&self) -> SessionResult<()> {
        self.new_game_from(Position::initial())
    }

    /// Start a new game from a decoded position string
    pub fn new_game_from_fen(&self, fen: &str) -> SessionResult<()> {
        self.new_game_from(Position::from_fen(fen)?)
    }

    fn new_game_from(&self, position: Position) -> SessionResult<()> {
        self.coordinator.reset(position)?;
        if self.selection.lock().clear().is_some() {
            self.bus.publish(&BoardEvent::SquareDeselected);
        }
        info!("[SESSION] New game from {}", self.coordinator.fen());
        Ok(())
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    pub fn selected(&self) -> Option<Square> {
        self.selection.lock().square()
    }

    pub fn position(&self) -> Position {
        self.coordinator.position()
    }

    pub fn fen(&self) -> String {
        self.coordinator.fen()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.coordinator.piece_at(square)
    }

    pub fn history(&self) -> MoveHistory {
        self.coordinator.history()
    }

    pub fn last_move(&self) -> Option<MoveRecord> {
        self.coordinator.last_move()
    }

    pub fn phase(&self) -> MovePhase {
        self.coordinator.phase()
    }

    pub fn result(&self) -> Option<GameOutcome> {
        self.coordinator.result()
    }
}
