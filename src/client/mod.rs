//! Delivery client for the vibex.sh ingest API.
//!
//! [`VibexClient`] owns a configuration snapshot, the enabled/disabled state
//! and a [`Transport`]. Each [`send_log`](VibexClient::send_log) performs at
//! most one synchronous POST and reports a [`SendOutcome`]; no error ever
//! reaches the caller.
//!
//! # Outcome classification
//!
//! - **2xx**: [`SendOutcome::Sent`].
//! - **401/403**: the kill switch trips; this and every later call report
//!   [`SendOutcome::Killed`] and [`SendOutcome::Skipped`] respectively.
//! - **429**: [`SendOutcome::RateLimited`]; the log is dropped.
//! - **Other status or transport failure**: [`SendOutcome::Failed`].
//!
//! There is no retry, queue or background thread. A dropped log is dropped.

mod builder;
mod config;
mod envelope;
mod outcome;
mod state;
mod status;
mod transport;


use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

pub use builder::{BuildError, VibexClientBuilder};
pub use config::{
    API_URL_ENV, DEFAULT_API_URL, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT,
    SESSION_ID_ENV, TOKEN_ENV, VibexConfig, WORKER_URL_ENV,
};
pub use envelope::LogEnvelope;
pub use outcome::{DeliveryError, SendOutcome};
pub use state::{ClientState, DisableReason};
pub use status::{ClientStatus, mask_token};
pub use transport::{HttpTransport, Transport, TransportError};

use crate::{console::ConsoleSink, rate_limited_warner::RateLimitedWarner};
use outcome::classify_status;
use state::StateCell;

/// Fail-safe client shipping single logs to the ingest API.
///
/// The client is `Send + Sync`; share it behind an [`Arc`] when several
/// handlers should observe the same kill switch.
pub struct VibexClient {
    config: VibexConfig,
    state: StateCell,
    transport: Arc<dyn Transport>,
    diagnostics: ConsoleSink,
    verbose: bool,
    warner: RateLimitedWarner,
}

impl VibexClient {
    /// Construct a quiet client with default timeouts.
    pub fn new(config: VibexConfig) -> Self {
        let transport = HttpTransport::new(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT);
        Self::from_parts(
            config,
            Arc::new(transport),
            ConsoleSink::stderr(),
            false,
            RateLimitedWarner::default(),
        )
    }

    /// Construct a client from `VIBEX_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(VibexConfig::from_env())
    }

    pub fn builder() -> VibexClientBuilder {
        VibexClientBuilder::new()
    }

    pub(crate) fn from_parts(
        config: VibexConfig,
        transport: Arc<dyn Transport>,
        diagnostics: ConsoleSink,
        verbose: bool,
        warner: RateLimitedWarner,
    ) -> Self {
        let initial = if config.is_valid() {
            ClientState::Enabled
        } else {
            ClientState::Disabled(DisableReason::InvalidConfig)
        };
        let client = Self {
            config,
            state: StateCell::new(initial),
            transport,
            diagnostics,
            verbose,
            warner,
        };
        client.announce_startup();
        client
    }

    fn announce_startup(&self) {
        if self.config.is_valid() {
            debug!("Vibex SDK enabled");
            if self.verbose {
                for line in status::startup_banner(&self.config) {
                    self.diagnostics.write_line(&line);
                }
                self.diagnostics.write_line("Vibex SDK enabled and ready");
            }
        } else {
            let missing = self.config.missing().join(", ");
            debug!("Vibex SDK disabled: Missing configuration: {missing}");
            if self.verbose {
                self.diagnostics
                    .write_line(&format!("Vibex SDK disabled: Missing configuration: {missing}"));
            }
        }
    }

    pub fn config(&self) -> &VibexConfig {
        &self.config
    }

    pub fn state(&self) -> ClientState {
        self.state.load()
    }

    /// `true` while the client may still send.
    pub fn is_enabled(&self) -> bool {
        self.state().is_enabled()
    }

    pub fn status(&self) -> ClientStatus {
        ClientStatus::capture(&self.config, self.state())
    }

    /// Write a one-line status summary to the diagnostics sink.
    pub fn print_status(&self) {
        self.diagnostics.write_line(&self.status().summary());
    }

    /// Ship one log stamped with the current time.
    pub fn send_log<P>(&self, kind: &str, payload: &P) -> SendOutcome
    where
        P: Serialize + ?Sized,
    {
        self.send_log_at(kind, payload, None)
    }

    /// Ship one log with an explicit millisecond timestamp.
    ///
    /// Disabled clients return [`SendOutcome::Skipped`] without touching the
    /// transport.
    pub fn send_log_at<P>(&self, kind: &str, payload: &P, timestamp: Option<i64>) -> SendOutcome
    where
        P: Serialize + ?Sized,
    {
        if !self.is_enabled() {
            return SendOutcome::Skipped;
        }
        match self.deliver(kind, payload, timestamp) {
            Ok(()) => SendOutcome::Sent,
            Err(err) => self.absorb(&err),
        }
    }

    fn deliver<P>(&self, kind: &str, payload: &P, timestamp: Option<i64>) -> Result<(), DeliveryError>
    where
        P: Serialize + ?Sized,
    {
        let (Some(token), Some(session_id)) = (self.config.token(), self.config.session_id())
        else {
            return Err(DeliveryError::ConfigInvalid {
                missing: self.config.missing(),
            });
        };
        let body = LogEnvelope::new(kind, payload, session_id, timestamp).to_json()?;
        let status = self.transport.post(self.config.api_url(), token, &body)?;
        classify_status(status)
    }

    fn absorb(&self, err: &DeliveryError) -> SendOutcome {
        let outcome = err.outcome();
        match err {
            DeliveryError::AuthRejected(_) => {
                if self.state.kill() {
                    let message = format!("Vibex SDK permanently disabled: {err}");
                    warn!("{message}");
                    self.report(&message);
                }
                return outcome;
            }
            DeliveryError::ConfigInvalid { .. } => return outcome,
            DeliveryError::Transport(_) => {
                debug!("Vibex SDK: Error sending log: {err}");
            }
            _ => {}
        }
        self.report(&format!("Vibex SDK: dropping log: {err}"));
        self.warner.record_drop();
        self.warner.warn_if_due(|count| {
            warn!("Vibex SDK dropped {count} logs (latest: {err})");
        });
        outcome
    }

    fn report(&self, message: &str) {
        if self.verbose {
            self.diagnostics.write_line(message);
        }
    }
}

impl Drop for VibexClient {
    fn drop(&mut self) {
        self.warner.flush(|count| {
            warn!("Vibex SDK dropped {count} logs in the last interval");
        });
    }
}

impl std::fmt::Debug for VibexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VibexClient")
            .field("api_url", &self.config.api_url())
            .field("state", &self.state())
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}
