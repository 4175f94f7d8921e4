//! HTTP client for the move authority
//!
//! Both calls are JSON `POST`s resolved against one base URL. A non-2xx
//! status, a transport error or a body that does not decode into a
//! [`MoveResponse`] is returned as an [`AuthorityError`]; the caller decides
//! what a failure means for the game.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use super::error::{AuthorityError, AuthorityResult};
use super::protocol::{MoveReplyRequest, MoveResponse, SubmitMoveRequest};
use crate::core::ClientSettings;

/// Remote service that judges moves and plays the opponent
#[async_trait]
pub trait MoveAuthority: Send + Sync {
    /// Ask the authority to play `request.from -> request.to` in `request.fen`
    async fn submit_move(&self, request: &SubmitMoveRequest) -> AuthorityResult<MoveResponse>;

    /// Ask the authority for its own move in `request.fen`
    async fn request_reply(&self, request: &MoveReplyRequest) -> AuthorityResult<MoveResponse>;
}

/// JSON-over-HTTP move authority
#[derive(Debug, Clone)]
pub struct HttpMoveAuthority {
    client: reqwest::Client,
    submit_url: Url,
    reply_url: Url,
}

impl HttpMoveAuthority {
    /// Build a client for `base_url`; the endpoint paths are resolved against it
    ///
    /// `timeout` bounds every request. `None` waits indefinitely.
    pub fn new(
        base_url: &str,
        submit_path: &str,
        reply_path: &str,
        timeout: Option<Duration>,
    ) -> AuthorityResult<Self> {
        let base = Url::parse(base_url)?;
        let submit_url = base.join(submit_path)?;
        let reply_url = base.join(reply_path)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AuthorityError::ClientBuild)?;

        info!(
            "[AUTHORITY] Using {} (submit) and {} (reply), timeout {:?}",
            submit_url, reply_url, timeout
        );

        Ok(Self {
            client,
            submit_url,
            reply_url,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> AuthorityResult<Self> {
        Self::new(
            &settings.authority_url,
            &settings.submit_path,
            &settings.reply_path,
            settings.request_timeout(),
        )
    }

    pub fn submit_url(&self) -> &Url {
        &self.submit_url
    }

    pub fn reply_url(&self) -> &Url {
        &self.reply_url
    }

    async fn post<B>(&self, url: &Url, body: &B) -> AuthorityResult<MoveResponse>
    where
        B: Serialize + Sync + ?Sized,
    {
        let endpoint = url.to_string();
        debug!("[AUTHORITY] POST {}", endpoint);

        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|source| AuthorityError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthorityError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| AuthorityError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|e| AuthorityError::malformed(endpoint, e.to_string()))
    }
}

#[async_trait]
impl MoveAuthority for HttpMoveAuthority {
    async fn submit_move(&self, request: &SubmitMoveRequest) -> AuthorityResult<MoveResponse> {
        self.post(&self.submit_url, request).await
    }

    async fn request_reply(&self, request: &MoveReplyRequest) -> AuthorityResult<MoveResponse> {
        self.post(&self.reply_url, request).await
    }
}
