//! Fail-safe log shipping for [vibex.sh](https://vibex.sh).
//!
//! The crate has two layers:
//!
//! * [`VibexClient`] posts JSON payloads to the ingest endpoint and never
//!   lets a failure reach the caller. A 401 or 403 response switches it off
//!   for the rest of the process.
//! * [`VibexHandler`] plugs the client into a host logging framework. It
//!   ships messages that parse as JSON objects and can echo records to the
//!   console.
//!
//! Hosts attach the handler through [`LogHandler`], the `log` facade bridge
//! in [`log_compat`] or the `tracing` layer in [`tracing_compat`].

pub mod client;
pub mod console;
pub mod formatter;
pub mod handler;
pub mod level;
#[cfg(feature = "log-compat")]
pub mod log_compat;
pub mod log_record;
mod rate_limited_warner;
#[cfg(feature = "tracing-compat")]
pub mod tracing_compat;
pub mod vibex_handler;

#[cfg(test)]
mod test_utils;

pub use client::{
    BuildError, ClientState, ClientStatus, DisableReason, HttpTransport, SendOutcome, Transport,
    TransportError, VibexClient, VibexClientBuilder, VibexConfig,
};
pub use console::ConsoleSink;
pub use formatter::{DefaultFormatter, MessageFormatter, RecordFormatter};
pub use handler::LogHandler;
pub use level::Level;
pub use log_record::{LogRecord, RecordMetadata};
pub use vibex_handler::{JSON_KIND, VibexHandler, VibexHandlerBuilder};

#[cfg(feature = "log-compat")]
pub use log_compat::VibexLogger;
#[cfg(feature = "tracing-compat")]
pub use tracing_compat::VibexLayer;
