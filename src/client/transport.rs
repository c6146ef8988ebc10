//! HTTP transport used to reach the ingest API.
//!
//! [`Transport`] is the seam between classification logic and the network:
//! the client hands it a URL, bearer token and encoded body, and gets back a
//! status code or a [`TransportError`]. [`HttpTransport`] is the production
//! implementation built on a `ureq` agent.

use std::{error::Error as _, io, sync::Arc, time::Duration};

use log::debug;
use thiserror::Error;
use ureq::{Agent, AgentBuilder, ErrorKind};

/// Failure below the HTTP layer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("transport error: {0}")]
    Other(String),
}

/// Performs one POST and reports the response status.
///
/// Implementations must return non-2xx responses as `Ok(status)` and reserve
/// `Err` for failures where no status was received.
pub trait Transport: Send + Sync {
    fn post(&self, url: &str, token: &str, body: &str) -> Result<u16, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post(&self, url: &str, token: &str, body: &str) -> Result<u16, TransportError> {
        (**self).post(url, token, body)
    }
}

/// Blocking transport backed by a pooled `ureq` agent.
pub struct HttpTransport {
    agent: Agent,
}

impl HttpTransport {
    /// Build a transport with the given timeouts.
    ///
    /// TLS goes through the platform stack via `native-tls`; if the connector
    /// cannot be created the agent keeps ureq's built-in TLS.
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> Self {
        let builder = AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout(request_timeout);
        let builder = match native_tls::TlsConnector::new() {
            Ok(connector) => builder.tls_connector(Arc::new(connector)),
            Err(err) => {
                debug!("vibex transport falling back to default TLS: {err}");
                builder
            }
        };
        Self {
            agent: builder.build(),
        }
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, token: &str, body: &str) -> Result<u16, TransportError> {
        let result = self
            .agent
            .post(url)
            .set("Authorization", &format!("Bearer {token}"))
            .set("Content-Type", "application/json")
            .send_string(body);
        match result {
            Ok(response) => Ok(response.status()),
            Err(ureq::Error::Status(code, _)) => Ok(code),
            Err(ureq::Error::Transport(transport)) => Err(classify_transport(&transport)),
        }
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

fn classify_transport(err: &ureq::Transport) -> TransportError {
    match err.kind() {
        ErrorKind::Dns | ErrorKind::ConnectionFailed => TransportError::Connect(err.to_string()),
        ErrorKind::Io if is_timeout(err) => TransportError::Timeout,
        _ => TransportError::Other(err.to_string()),
    }
}

fn is_timeout(err: &ureq::Transport) -> bool {
    err.source()
        .and_then(|source| source.downcast_ref::<io::Error>())
        .is_some_and(|io_err| {
            matches!(
                io_err.kind(),
                io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
            )
        })
}
