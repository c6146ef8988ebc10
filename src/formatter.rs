//! Console rendering for log records.
//!
//! The handler writes records to the console through a [`SharedFormatter`],
//! so callers can swap the layout without touching the delivery path.

use std::{fmt, sync::Arc};

use crate::log_record::LogRecord;

/// Trait for formatting log records into strings.
///
/// Implementors must be thread-safe (`Send + Sync`) because a single handler
/// may be invoked from many threads at once.
pub trait RecordFormatter: Send + Sync {
    /// Format a log record into a string representation.
    fn format(&self, record: &LogRecord) -> String;
}

/// Shared formatter trait object used by handlers.
#[derive(Clone)]
pub struct SharedFormatter {
    inner: Arc<dyn RecordFormatter>,
}

impl SharedFormatter {
    pub fn new<F>(formatter: F) -> Self
    where
        F: RecordFormatter + 'static,
    {
        Self {
            inner: Arc::new(formatter),
        }
    }

    pub fn format(&self, record: &LogRecord) -> String {
        self.inner.format(record)
    }
}

impl Default for SharedFormatter {
    fn default() -> Self {
        Self::new(DefaultFormatter)
    }
}

impl fmt::Debug for SharedFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedFormatter(<dyn RecordFormatter>)")
    }
}

/// `logger [LEVEL] message`
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultFormatter;

impl RecordFormatter for DefaultFormatter {
    fn format(&self, record: &LogRecord) -> String {
        format!(
            "{} [{}] {}",
            record.logger(),
            record.level().as_str(),
            record.message()
        )
    }
}

/// Emits the bare message, matching a `%(message)s` style layout.
#[derive(Copy, Clone, Debug, Default)]
pub struct MessageFormatter;

impl RecordFormatter for MessageFormatter {
    fn format(&self, record: &LogRecord) -> String {
        record.message().to_owned()
    }
}
