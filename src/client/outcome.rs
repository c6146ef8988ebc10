//! Delivery outcomes and the failure taxonomy behind them.

use thiserror::Error;

use super::transport::TransportError;

/// Result of a single [`send_log`](super::VibexClient::send_log) call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// The ingest API accepted the log (2xx).
    Sent,
    /// The client is disabled; no request was made.
    Skipped,
    /// The token was rejected; the client is now permanently disabled.
    Killed,
    /// The ingest API returned 429; the log was dropped.
    RateLimited,
    /// Any other failure; the log was dropped.
    Failed,
}

impl SendOutcome {
    pub fn is_sent(self) -> bool {
        matches!(self, SendOutcome::Sent)
    }
}

/// Reasons a log was not delivered.
///
/// These never escape the client: each one is absorbed and turned into a
/// [`SendOutcome`].
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("missing configuration: {}", missing.join(", "))]
    ConfigInvalid { missing: Vec<&'static str> },
    #[error("token expired or invalid ({0})")]
    AuthRejected(u16),
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("session not found (404)")]
    SessionNotFound,
    #[error("server returned {0}")]
    ServerError(u16),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to encode envelope: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DeliveryError {
    pub fn outcome(&self) -> SendOutcome {
        match self {
            DeliveryError::ConfigInvalid { .. } => SendOutcome::Skipped,
            DeliveryError::AuthRejected(_) => SendOutcome::Killed,
            DeliveryError::RateLimited => SendOutcome::RateLimited,
            DeliveryError::SessionNotFound
            | DeliveryError::ServerError(_)
            | DeliveryError::Transport(_)
            | DeliveryError::Serialize(_) => SendOutcome::Failed,
        }
    }
}

/// Classify an HTTP status code returned by the ingest API.
///
/// * **2xx** → delivered
/// * **401/403** → [`DeliveryError::AuthRejected`], trips the kill switch
/// * **429** → [`DeliveryError::RateLimited`]
/// * **404** → [`DeliveryError::SessionNotFound`]
/// * **other** → [`DeliveryError::ServerError`]
pub(crate) fn classify_status(status: u16) -> Result<(), DeliveryError> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(DeliveryError::AuthRejected(status)),
        429 => Err(DeliveryError::RateLimited),
        404 => Err(DeliveryError::SessionNotFound),
        _ => Err(DeliveryError::ServerError(status)),
    }
}
