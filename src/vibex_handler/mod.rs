//! Handler shipping JSON log records to vibex.sh.
//!
//! [`VibexHandler`] sits between a host logging framework and a
//! [`VibexClient`]. For every record it:
//!
//! 1. writes the record to the console when `passthrough_console` is set;
//! 2. parses the message as JSON, silently discarding anything that is not
//!    a JSON object;
//! 3. ships the object with [`VibexClient::send_log_at`], stamped with the
//!    record's creation time;
//! 4. writes the record to the console if the send did not succeed,
//!    `passthrough_console` is off and `passthrough_on_failure` is on.
//!
//! No step can fail the caller.

mod builder;


use std::sync::Arc;

use serde_json::{Map, Value};

pub use builder::VibexHandlerBuilder;

use crate::{
    client::{ClientStatus, SendOutcome, VibexClient},
    console::ConsoleSink,
    formatter::SharedFormatter,
    handler::LogHandler,
    log_record::LogRecord,
};

/// Envelope kind used for structured records.
pub const JSON_KIND: &str = "json";

pub struct VibexHandler {
    client: Arc<VibexClient>,
    console: ConsoleSink,
    formatter: SharedFormatter,
    passthrough_console: bool,
    passthrough_on_failure: bool,
}

impl VibexHandler {
    /// Handler configured from the environment with default passthrough.
    pub fn new() -> Self {
        Self::from_parts(
            Arc::new(VibexClient::from_env()),
            ConsoleSink::stderr(),
            SharedFormatter::default(),
            true,
            false,
        )
    }

    pub fn builder() -> VibexHandlerBuilder {
        VibexHandlerBuilder::new()
    }

    pub(crate) fn from_parts(
        client: Arc<VibexClient>,
        console: ConsoleSink,
        formatter: SharedFormatter,
        passthrough_console: bool,
        passthrough_on_failure: bool,
    ) -> Self {
        Self {
            client,
            console,
            formatter,
            passthrough_console,
            passthrough_on_failure,
        }
    }

    /// Handle `record` and report what happened to it.
    ///
    /// Returns `None` when the message was not a JSON object and the record
    /// was discarded without a send attempt.
    pub fn dispatch(&self, record: &LogRecord) -> Option<SendOutcome> {
        if self.passthrough_console {
            self.echo(record);
        }
        let payload = parse_payload(record.message())?;
        let outcome = self
            .client
            .send_log_at(JSON_KIND, &payload, Some(record.timestamp_millis()));
        if !outcome.is_sent() && !self.passthrough_console && self.passthrough_on_failure {
            self.echo(record);
        }
        Some(outcome)
    }

    fn echo(&self, record: &LogRecord) {
        self.console.write_line(&self.formatter.format(record));
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_enabled()
    }

    pub fn status(&self) -> ClientStatus {
        self.client.status()
    }

    pub fn print_status(&self) {
        self.client.print_status();
    }

    pub fn client(&self) -> &Arc<VibexClient> {
        &self.client
    }

    pub fn passthrough_console(&self) -> bool {
        self.passthrough_console
    }

    pub fn passthrough_on_failure(&self) -> bool {
        self.passthrough_on_failure
    }
}

impl Default for VibexHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl LogHandler for VibexHandler {
    fn handle(&self, record: &LogRecord) {
        let _ = self.dispatch(record);
    }
}

impl std::fmt::Debug for VibexHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VibexHandler")
            .field("client", &self.client)
            .field("passthrough_console", &self.passthrough_console)
            .field("passthrough_on_failure", &self.passthrough_on_failure)
            .finish_non_exhaustive()
    }
}

/// Only JSON objects are shipped; arrays and scalars are discarded.
fn parse_payload(message: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(message) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
