//! Configuration snapshot consumed by [`VibexClient`](super::VibexClient).
//!
//! The snapshot is read once, when the client is constructed. Later changes
//! to the process environment have no effect on a running client.

use std::time::Duration;

/// Bearer credential presented to the ingest API.
pub const TOKEN_ENV: &str = "VIBEX_TOKEN";
/// Opaque session identifier echoed in every envelope.
pub const SESSION_ID_ENV: &str = "VIBEX_SESSION_ID";
/// Full ingest URL override.
pub const API_URL_ENV: &str = "VIBEX_API_URL";
/// Base URL of an ingest worker; `/api/v1/ingest` is appended.
pub const WORKER_URL_ENV: &str = "VIBEX_WORKER_URL";

/// Production ingest endpoint.
pub const DEFAULT_API_URL: &str = "https://ingest.vibex.sh/api/v1/ingest";
const INGEST_PATH: &str = "/api/v1/ingest";
const SESSION_PREFIX: &str = "vibex-";

/// Default connection timeout for ingest requests.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default overall request timeout for ingest requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Immutable credentials and endpoint for a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VibexConfig {
    token: Option<String>,
    session_id: Option<String>,
    api_url: String,
}

impl VibexConfig {
    /// Build a configuration from explicit values, bypassing the environment.
    pub fn new(token: Option<&str>, session_id: Option<&str>, api_url: &str) -> Self {
        Self {
            token: token.map(str::to_owned),
            session_id: session_id.map(str::to_owned),
            api_url: api_url.to_owned(),
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// The URL is resolved in order: [`API_URL_ENV`], then
    /// [`WORKER_URL_ENV`] joined with the ingest path, then
    /// [`DEFAULT_API_URL`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let api_url = non_empty(API_URL_ENV)
            .or_else(|| {
                non_empty(WORKER_URL_ENV)
                    .map(|worker| format!("{}{INGEST_PATH}", worker.trim_end_matches('/')))
            })
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        Self {
            token: lookup(TOKEN_ENV),
            session_id: lookup(SESSION_ID_ENV),
            api_url,
        }
    }

    /// Token, if present and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Session identifier, if present and non-empty.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|s| !s.is_empty())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Both token and session identifier are non-empty.
    pub fn is_valid(&self) -> bool {
        self.token().is_some() && self.session_id().is_some()
    }

    /// Names of the required variables that are missing or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.token().is_none() {
            missing.push(TOKEN_ENV);
        }
        if self.session_id().is_none() {
            missing.push(SESSION_ID_ENV);
        }
        missing
    }

    /// Session identifier carrying the `vibex-` prefix.
    pub fn normalized_session_id(&self) -> Option<String> {
        self.session_id().map(|id| {
            if id.starts_with(SESSION_PREFIX) {
                id.to_owned()
            } else {
                format!("{SESSION_PREFIX}{id}")
            }
        })
    }
}

impl Default for VibexConfig {
    fn default() -> Self {
        Self {
            token: None,
            session_id: None,
            api_url: DEFAULT_API_URL.to_owned(),
        }
    }
}
