//! HTTP Move Authority Tests
//!
//! Runs `HttpMoveAuthority` against a local Axum server bound to an
//! ephemeral port.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chessboard_client::game::{EventBus, GameSession, MoveOutcome, MovePhase, STARTING_FEN};
use chessboard_client::networking::{
    AuthorityError, GameOutcome, HttpMoveAuthority, MoveAuthority, MoveReplyRequest, SubmitMoveRequest,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use common::{sq, AFTER_E4, AFTER_E5};

type Received = Arc<Mutex<Vec<(&'static str, Value)>>>;

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Server that plays e2-e4 / e7-e5 and records every body it receives
async fn opening_server() -> (SocketAddr, Received) {
    async fn make_move(State(received): State<Received>, Json(body): Json<Value>) -> Json<Value> {
        received.lock().push(("makemove", body));
        Json(json!({
            "successful": true,
            "fen": AFTER_E4,
            "result": "ongoing",
            "from": "e2",
            "to": "e4",
        }))
    }

    async fn request_move(State(received): State<Received>, Json(body): Json<Value>) -> Json<Value> {
        received.lock().push(("requestmove", body));
        Json(json!({
            "successful": true,
            "fen": AFTER_E5,
            "from": "e7",
            "to": "e5",
        }))
    }

    let received: Received = Arc::default();
    let router = Router::new()
        .route("/makemove", post(make_move))
        .route("/requestmove", post(request_move))
        .with_state(received.clone());
    (serve(router).await, received)
}

fn authority(addr: SocketAddr, timeout: Option<Duration>) -> HttpMoveAuthority {
    HttpMoveAuthority::new(&format!("http://{}", addr), "/makemove", "/requestmove", timeout).unwrap()
}

fn submit_e4() -> SubmitMoveRequest {
    SubmitMoveRequest {
        from: sq("e2"),
        to: sq("e4"),
        fen: STARTING_FEN.to_string(),
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[tokio::test]
async fn test_submit_and_reply_round_trip() {
    let (addr, received) = opening_server().await;
    let authority = authority(addr, Some(Duration::from_secs(5)));

    let submitted = authority.submit_move(&submit_e4()).await.unwrap();
    assert!(submitted.successful);
    assert_eq!(submitted.fen.as_deref(), Some(AFTER_E4));
    assert_eq!((submitted.from, submitted.to), (Some(sq("e2")), Some(sq("e4"))));

    let reply = authority
        .request_reply(&MoveReplyRequest {
            fen: AFTER_E4.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(reply.fen.as_deref(), Some(AFTER_E5));
    assert_eq!(reply.result, GameOutcome::Ongoing, "missing result means ongoing");

    let received = received.lock();
    assert_eq!(
        received[0],
        ("makemove", json!({ "from": "e2", "to": "e4", "fen": STARTING_FEN }))
    );
    assert_eq!(received[1], ("requestmove", json!({ "fen": AFTER_E4 })));
}

#[tokio::test]
async fn test_rejection_body() {
    let router = Router::new().route(
        "/makemove",
        post(|| async { Json(json!({ "successful": false })) }),
    );
    let addr = serve(router).await;

    let response = authority(addr, None).submit_move(&submit_e4()).await.unwrap();

    assert!(!response.successful);
    assert_eq!(response.fen, None);
}

#[tokio::test]
async fn test_terminal_result_tags() {
    let router = Router::new().route(
        "/makemove",
        post(|| async {
            Json(json!({ "successful": true, "fen": AFTER_E4, "result": "stalemate" }))
        }),
    );
    let addr = serve(router).await;

    let response = authority(addr, None).submit_move(&submit_e4()).await.unwrap();

    assert_eq!(response.result, GameOutcome::Draw);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_server_error_status() {
    let router = Router::new().route(
        "/makemove",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "engine crashed") }),
    );
    let addr = serve(router).await;

    let err = authority(addr, None).submit_move(&submit_e4()).await.unwrap_err();

    match err {
        AuthorityError::Status { endpoint, status } => {
            assert_eq!(status, 500);
            assert!(endpoint.ends_with("/makemove"));
        }
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_endpoint_is_a_status_error() {
    let addr = serve(Router::new()).await;

    let err = authority(addr, None).submit_move(&submit_e4()).await.unwrap_err();

    assert!(matches!(err, AuthorityError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let router = Router::new().route("/makemove", post(|| async { "Move accepted!" }));
    let addr = serve(router).await;

    let err = authority(addr, None).submit_move(&submit_e4()).await.unwrap_err();

    assert!(matches!(err, AuthorityError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_unknown_result_tag_is_malformed() {
    let router = Router::new().route(
        "/makemove",
        post(|| async { Json(json!({ "successful": true, "fen": AFTER_E4, "result": "resigned" })) }),
    );
    let addr = serve(router).await;

    let err = authority(addr, None).submit_move(&submit_e4()).await.unwrap_err();

    assert!(matches!(err, AuthorityError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let err = authority(addr, Some(Duration::from_secs(5)))
        .submit_move(&submit_e4())
        .await
        .unwrap_err();

    assert!(matches!(err, AuthorityError::Transport { .. }));
}

#[tokio::test]
async fn test_slow_authority_times_out() {
    let router = Router::new().route(
        "/makemove",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "successful": false }))
        }),
    );
    let addr = serve(router).await;

    let err = authority(addr, Some(Duration::from_millis(100)))
        .submit_move(&submit_e4())
        .await
        .unwrap_err();

    match err {
        AuthorityError::Transport { source, .. } => assert!(source.is_timeout()),
        other => panic!("expected a timeout, got {:?}", other),
    }
}

// ============================================================================
// Session over HTTP
// ============================================================================

#[tokio::test]
async fn test_session_plays_against_http_authority() {
    let (addr, received) = opening_server().await;
    let session = GameSession::new(Arc::new(authority(addr, Some(Duration::from_secs(5)))), EventBus::new());

    session.click(sq("e2")).await;
    session.click(sq("e4")).await;

    assert_eq!(session.fen(), AFTER_E5);
    assert_eq!(session.history().len(), 2);
    assert_eq!(received.lock().len(), 2);
}

#[tokio::test]
async fn test_session_survives_unreachable_authority() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let session = GameSession::new(Arc::new(authority(addr, Some(Duration::from_secs(5)))), EventBus::new());

    let outcome = session.attempt_move(sq("e2"), sq("e4")).await;

    assert!(matches!(outcome, MoveOutcome::Failed(AuthorityError::Transport { .. })));
    assert_eq!(session.fen(), STARTING_FEN);
    assert!(session.history().is_empty());
    assert_eq!(session.phase(), MovePhase::Idle);
}
