//! `tracing` bridge.
//!
//! [`VibexLayer`] is a `tracing_subscriber` layer that turns each event into
//! a [`LogRecord`] and forwards it to a [`LogHandler`]. The event's
//! `message` field becomes the record message; other fields are kept as
//! key-values on the record metadata.
//!
//! ```no_run
//! use tracing_subscriber::prelude::*;
//! use vibex_sh::{VibexHandler, VibexLayer};
//!
//! tracing_subscriber::registry()
//!     .with(VibexLayer::new(VibexHandler::new()))
//!     .init();
//! tracing::info!("{}", r#"{"cpu": 45}"#);
//! ```

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::{Layer, layer::Context};

use crate::handler::LogHandler;
use crate::level::Level;
use crate::log_record::{LogRecord, RecordMetadata, is_internal_target, normalise_target};

/// Layer forwarding `tracing` events to a [`LogHandler`].
pub struct VibexLayer<H> {
    handler: H,
}

impl<H: LogHandler> VibexLayer<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

fn map_level(level: tracing::Level) -> Level {
    match level {
        tracing::Level::ERROR => Level::Error,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::INFO => Level::Info,
        tracing::Level::DEBUG => Level::Debug,
        tracing::Level::TRACE => Level::Trace,
    }
}

impl<S, H> Layer<S> for VibexLayer<H>
where
    S: Subscriber,
    H: LogHandler + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if is_internal_target(meta.target()) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let metadata = RecordMetadata {
            module_path: meta.module_path().unwrap_or_default().to_owned(),
            filename: meta.file().unwrap_or_default().to_owned(),
            line_number: meta.line().unwrap_or(0),
            key_values: visitor.fields,
            ..Default::default()
        };
        let record = LogRecord::with_metadata(
            normalise_target(meta.target()).as_ref(),
            map_level(*meta.level()),
            &visitor.message,
            metadata,
        );
        self.handler.handle(&record);
    }
}

/// Splits event fields into the message and everything else.
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: BTreeMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.fields.insert(field.name().to_owned(), value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let mut rendered = String::new();
        let _ = write!(rendered, "{value:?}");
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields.insert(field.name().to_owned(), rendered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::CollectingHandler;
    use rstest::rstest;
    use tracing_subscriber::prelude::*;

    fn capture(emit: impl FnOnce()) -> Vec<LogRecord> {
        let handler = CollectingHandler::new();
        let subscriber = tracing_subscriber::registry().with(VibexLayer::new(handler.clone()));
        tracing::subscriber::with_default(subscriber, emit);
        handler.collected()
    }

    #[rstest]
    fn message_field_becomes_record_message() {
        let records = capture(|| {
            tracing::warn!(target: "app::metrics", host = "web-1", attempt = 3, "{}", r#"{"cpu": 45}"#);
        });

        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.message(), r#"{"cpu": 45}"#);
        assert_eq!(rec.logger(), "app.metrics");
        assert_eq!(rec.level(), Level::Warn);
        assert_eq!(rec.metadata().key_values["host"], "web-1");
        assert_eq!(rec.metadata().key_values["attempt"], "3");
    }

    #[rstest]
    fn own_diagnostics_are_not_forwarded() {
        let records = capture(|| {
            tracing::warn!(target: "vibex_sh::client", "Vibex SDK: dropping log");
            tracing::info!(target: "app", "kept");
        });

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message(), "kept");
    }

    #[rstest]
    #[case(tracing::Level::ERROR, Level::Error)]
    #[case(tracing::Level::WARN, Level::Warn)]
    #[case(tracing::Level::INFO, Level::Info)]
    #[case(tracing::Level::DEBUG, Level::Debug)]
    #[case(tracing::Level::TRACE, Level::Trace)]
    fn levels_map_directly(#[case] level: tracing::Level, #[case] expected: Level) {
        assert_eq!(map_level(level), expected);
    }
}
