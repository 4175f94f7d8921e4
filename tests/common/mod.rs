//! Shared helpers for the integration tests
//!
//! [`ScriptedAuthority`] answers from queues of canned responses and records
//! every request it receives. An optional [`Gate`] holds submit calls open so
//! tests can observe the coordinator mid-flight.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chessboard_client::game::{BoardEvent, EventBus, Square};
use chessboard_client::networking::{
    AuthorityError, AuthorityResult, GameOutcome, MoveAuthority, MoveReplyRequest, MoveResponse,
    SubmitMoveRequest,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

pub const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
pub const AFTER_E5: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2";

pub fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

pub fn accepted(from: &str, to: &str, fen: &str, result: GameOutcome) -> AuthorityResult<MoveResponse> {
    Ok(MoveResponse::accepted(sq(from), sq(to), fen, result))
}

pub fn unavailable() -> AuthorityResult<MoveResponse> {
    Err(AuthorityError::Status {
        endpoint: "scripted".to_string(),
        status: 503,
    })
}

/// Holds a submit call until released
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct ScriptedAuthority {
    submits: Mutex<VecDeque<AuthorityResult<MoveResponse>>>,
    replies: Mutex<VecDeque<AuthorityResult<MoveResponse>>>,
    pub submit_calls: Mutex<Vec<SubmitMoveRequest>>,
    pub reply_calls: Mutex<Vec<MoveReplyRequest>>,
    gate: Option<Arc<Gate>>,
}

impl ScriptedAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Gate>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn on_submit(self, response: AuthorityResult<MoveResponse>) -> Self {
        self.submits.lock().push_back(response);
        self
    }

    pub fn on_reply(self, response: AuthorityResult<MoveResponse>) -> Self {
        self.replies.lock().push_back(response);
        self
    }

    pub fn submit_count(&self) -> usize {
        self.submit_calls.lock().len()
    }

    pub fn reply_count(&self) -> usize {
        self.reply_calls.lock().len()
    }
}

fn exhausted() -> AuthorityResult<MoveResponse> {
    Err(AuthorityError::malformed("scripted", "no scripted response left"))
}

#[async_trait]
impl MoveAuthority for ScriptedAuthority {
    async fn submit_move(&self, request: &SubmitMoveRequest) -> AuthorityResult<MoveResponse> {
        self.submit_calls.lock().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.submits.lock().pop_front().unwrap_or_else(exhausted)
    }

    async fn request_reply(&self, request: &MoveReplyRequest) -> AuthorityResult<MoveResponse> {
        self.reply_calls.lock().push(request.clone());
        self.replies.lock().pop_front().unwrap_or_else(exhausted)
    }
}

/// Collect every event published on `bus`
pub fn record_events(bus: &EventBus) -> Arc<Mutex<Vec<BoardEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    bus.subscribe(move |event| sink.lock().push(event.clone()));
    log
}
