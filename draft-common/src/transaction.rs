//! Transaction id propagation and per-request context
//!
//! Every inbound request is tagged with a transaction id taken from the
//! `X-Request-Id` header (or generated when absent). The id travels with the
//! request through an explicit [`RequestContext`], which also carries the
//! deadline and cancellation token bounding outbound calls.

use axum::http::HeaderMap;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// HTTP header carrying the transaction id
pub const TRANSACTION_ID_HEADER: &str = "X-Request-Id";

const TRANSACTION_ID_PREFIX: &str = "tid_";
const TRANSACTION_ID_RANDOM_LEN: usize = 10;

/// Generate a new transaction id (`tid_` followed by 10 random characters)
pub fn new_transaction_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TRANSACTION_ID_RANDOM_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();
    format!("{}{}", TRANSACTION_ID_PREFIX, suffix)
}

/// Read the transaction id from request headers, if present and non-blank
pub fn transaction_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(TRANSACTION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|tid| !tid.is_empty())
        .map(str::to_string)
}

/// Transaction id from headers, or a freshly generated one
pub fn transaction_id_from_headers_or_new(headers: &HeaderMap) -> String {
    transaction_id_from_headers(headers).unwrap_or_else(new_transaction_id)
}

/// Reason an outbound call was cut short by its request context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Interrupted {
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    #[error("request cancelled")]
    Cancelled,
}

/// Call-scoped context threaded through the annotation pipeline
///
/// Cloning is cheap; clones share the cancellation token.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    transaction_id: Option<String>,
    deadline: Option<Instant>,
    cancellation: CancellationToken,
}

impl RequestContext {
    /// Context without transaction id, deadline or cancellation
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying the given transaction id
    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// Bound all work done under this context to `timeout` from now
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Replace the cancellation token (e.g. with a child of a server-wide token)
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Drive `fut` to completion unless the deadline passes or the context is cancelled first
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Interrupted>
    where
        F: Future,
    {
        let bounded = async {
            match self.deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, fut)
                    .await
                    .map_err(|_| Interrupted::DeadlineExceeded),
                None => Ok(fut.await),
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(Interrupted::Cancelled),
            result = bounded => result,
        }
    }
}
