//! Error types for move-authority calls
//!
//! Every variant is a failed attempt from the coordinator's point of view:
//! nothing is committed and nothing is retried.

use thiserror::Error;

use crate::game::NotationError;

/// Errors that can occur while talking to the move authority
#[derive(Error, Debug)]
pub enum AuthorityError {
    /// Base URL or endpoint path could not be resolved
    #[error("Invalid move authority URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Network error, timeout or refused connection
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx status
    #[error("{endpoint} answered with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Body was not a valid move response
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    /// Accepted move carried a position string that does not decode
    #[error("Position from {endpoint} does not decode: {source}")]
    InvalidPosition {
        endpoint: String,
        #[source]
        source: NotationError,
    },
}

impl AuthorityError {
    pub fn malformed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        AuthorityError::MalformedResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for move-authority calls
pub type AuthorityResult<T> = Result<T, AuthorityError>;
