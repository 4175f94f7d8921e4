//! Move submission and reconciliation
//!
//! The coordinator owns the position, the move history and the in-flight
//! phase. A move attempt runs as one async sequence:
//!
//! ```text
//! Idle ─attempt─▶ Submitting ─accepted, ongoing─▶ AwaitingReply ─▶ Idle
//!                     │                                  │
//!                     └── rejected / failed / game over ─┴──────▶ Idle
//! ```
//!
//! While the phase is not `Idle` every new attempt returns
//! [`MoveOutcome::Busy`] without touching the network, the bus or the
//! history. The phase returns to `Idle` on every path, including when the
//! future is dropped before completion.
//!
//! An accepted response is decoded before anything is committed; the ledger
//! append and the position swap then happen under one lock, so a failure
//! never leaves a half-applied move behind.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::error::{SessionError, SessionResult};
use super::events::{BoardEvent, EventBus};
use super::history::{MoveHistory, MoveRecord};
use super::notation::{Piece, Position};
use super::types::Square;
use crate::networking::{
    AuthorityError, AuthorityResult, GameOutcome, MoveAuthority, MoveReplyRequest, MoveResponse,
    SubmitMoveRequest,
};

const SUBMIT_CALL: &str = "submit-move";
const REPLY_CALL: &str = "request-reply";

/// Where the current move sequence is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovePhase {
    #[default]
    Idle,
    /// Waiting for the authority to judge the player's move
    Submitting { from: Square, to: Square },
    /// Player's move committed, waiting for the authority's own move
    AwaitingReply,
}

/// Result of [`MoveCoordinator::attempt_move`]
#[derive(Debug)]
pub enum MoveOutcome {
    /// Another move sequence is in flight; nothing happened
    Busy,
    /// The game already ended; nothing happened
    GameFinished(GameOutcome),
    /// The authority refused the move
    Rejected,
    /// The submit call failed; nothing was committed
    Failed(AuthorityError),
    /// The player's move was committed
    Played {
        user: MoveRecord,
        /// `None` when the game ended on the player's move or the reply call failed
        reply: Option<MoveRecord>,
        result: GameOutcome,
    },
}

impl MoveOutcome {
    pub fn is_played(&self) -> bool {
        matches!(self, MoveOutcome::Played { .. })
    }
}

#[derive(Debug, Default)]
struct BoardState {
    position: Position,
    history: MoveHistory,
    phase: MovePhase,
    result: Option<GameOutcome>,
}

/// Owns the position and submits moves to the move authority
#[derive(Clone)]
pub struct MoveCoordinator {
    state: Arc<Mutex<BoardState>>,
    authority: Arc<dyn MoveAuthority>,
    bus: EventBus,
}

/// Resets the phase when the move sequence ends, however it ends
struct InFlight<'a> {
    coordinator: &'a MoveCoordinator,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.coordinator.state.lock().phase = MovePhase::Idle;
        self.coordinator.bus.publish(&BoardEvent::ThinkingFinished);
    }
}

impl MoveCoordinator {
    /// Coordinator starting from the standard initial position
    pub fn new(authority: Arc<dyn MoveAuthority>, bus: EventBus) -> Self {
        Self {
            state: Arc::new(Mutex::new(BoardState::default())),
            authority,
            bus,
        }
    }

    /// Submit `from -> to` and, if the game goes on, fetch the reply
    pub async fn attempt_move(&self, from: Square, to: Square) -> MoveOutcome {
        let fen = {
            let mut state = self.state.lock();
            if state.phase != MovePhase::Idle {
                debug!("[MOVE] Dropping {}-{}: {:?} in progress", from, to, state.phase);
                return MoveOutcome::Busy;
            }
            if let Some(result) = state.result {
                debug!("[MOVE] Dropping {}-{}: game is over ({})", from, to, result);
                return MoveOutcome::GameFinished(result);
            }
            state.phase = MovePhase::Submitting { from, to };
            state.position.fen().to_string()
        };

        let _in_flight = InFlight { coordinator: self };
        self.bus.publish(&BoardEvent::ThinkingStarted);

        self.exchange(from, to, fen).await
    }

    async fn exchange(&self, from: Square, to: Square, fen: String) -> MoveOutcome {
        info!("[MOVE] Submitting {}-{}", from, to);
        let request = SubmitMoveRequest { from, to, fen };

        let response = match self.authority.submit_move(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("[MOVE] Submitting {}-{} failed: {}", from, to, e);
                return MoveOutcome::Failed(e);
            }
        };

        if !response.successful {
            info!("[MOVE] Authority rejected {}-{}", from, to);
            return MoveOutcome::Rejected;
        }

        let user = match self.commit(SUBMIT_CALL, &response, Some((from, to))) {
            Ok(record) => record,
            Err(e) => {
                warn!("[MOVE] Discarding response to {}-{}: {}", from, to, e);
                return MoveOutcome::Failed(e);
            }
        };

        if response.result.is_terminal() {
            return self.finish(user, None, response.result);
        }

        self.state.lock().phase = MovePhase::AwaitingReply;
        let reply_request = MoveReplyRequest {
            fen: user.fen.clone(),
        };

        let reply = match self.authority.request_reply(&reply_request).await {
            Ok(reply) if reply.successful => reply,
            Ok(_) => {
                warn!("[MOVE] Authority returned no reply after {}", user);
                return Self::played(user, None);
            }
            Err(e) => {
                warn!("[MOVE] Requesting reply after {} failed: {}", user, e);
                return Self::played(user, None);
            }
        };

        let reply_record = match self.commit(REPLY_CALL, &reply, None) {
            Ok(record) => record,
            Err(e) => {
                warn!("[MOVE] Discarding reply after {}: {}", user, e);
                return Self::played(user, None);
            }
        };

        match reply.result {
            GameOutcome::Ongoing => Self::played(user, Some(reply_record)),
            GameOutcome::WhiteWins => self.finish(user, Some(reply_record), GameOutcome::WhiteWins),
            GameOutcome::BlackWins => self.finish(user, Some(reply_record), GameOutcome::BlackWins),
            GameOutcome::Draw => self.finish(user, Some(reply_record), GameOutcome::Draw),
        }
    }

    /// Decode an accepted response and apply it to the history and position
    fn commit(
        &self,
        call: &str,
        response: &MoveResponse,
        requested: Option<(Square, Square)>,
    ) -> AuthorityResult<MoveRecord> {
        let fen = response
            .fen
            .as_deref()
            .ok_or_else(|| AuthorityError::malformed(call, "accepted move without a position"))?;

        let (from, to) = match (response.from, response.to, requested) {
            (Some(from), Some(to), _) => (from, to),
            (_, _, Some(requested)) => requested,
            _ => {
                return Err(AuthorityError::malformed(
                    call,
                    "accepted move without origin and destination",
                ))
            }
        };

        let position = Position::from_fen(fen).map_err(|source| AuthorityError::InvalidPosition {
            endpoint: call.to_string(),
            source,
        })?;

        let record = {
            let mut state = self.state.lock();
            let record = state.history.append(from, to, fen).clone();
            state.position = position;
            record
        };

        info!("[MOVE] Ply {}: {}", record.half_move, record);
        self.bus.publish(&BoardEvent::MoveAdded {
            from: record.from,
            to: record.to,
            half_move: record.half_move,
        });
        self.bus.publish(&BoardEvent::BoardUpdated);

        Ok(record)
    }

    fn finish(&self, user: MoveRecord, reply: Option<MoveRecord>, result: GameOutcome) -> MoveOutcome {
        self.state.lock().result = Some(result);
        info!("[MOVE] Game over: {}", result);
        self.bus.publish(&BoardEvent::GameOver(result));
        MoveOutcome::Played { user, reply, result }
    }

    fn played(user: MoveRecord, reply: Option<MoveRecord>) -> MoveOutcome {
        MoveOutcome::Played {
            user,
            reply,
            result: GameOutcome::Ongoing,
        }
    }

    /// Start over from `position` with an empty history
    ///
    /// Refused while a move sequence is in flight.
    pub fn reset(&self, position: Position) -> SessionResult<()> {
        {
            let mut state = self.state.lock();
            if state.phase != MovePhase::Idle {
                return Err(SessionError::MoveInFlight);
            }
            state.history.clear();
            state.position = position;
            state.result = None;
        }

        self.bus.publish(&BoardEvent::HistoryCleared);
        self.bus.publish(&BoardEvent::BoardUpdated);
        Ok(())
    }

    pub fn position(&self) -> Position {
        self.state.lock().position.clone()
    }

    pub fn fen(&self) -> String {
        self.state.lock().position.fen().to_string()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.state.lock().position.piece_at(square)
    }

    pub fn history(&self) -> MoveHistory {
        self.state.lock().history.clone()
    }

    pub fn last_move(&self) -> Option<MoveRecord> {
        self.state.lock().history.last_move().cloned()
    }

    pub fn phase(&self) -> MovePhase {
        self.state.lock().phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase() != MovePhase::Idle
    }

    /// Terminal result, once the game has ended
    pub fn result(&self) -> Option<GameOutcome> {
        self.state.lock().result
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}
