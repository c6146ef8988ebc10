//! Log record representation shared by every host adapter.
//!
//! The `log` and `tracing` bridges convert their native events into a
//! [`LogRecord`] before handing it to a [`LogHandler`](crate::handler::LogHandler).
//! Only the message is inspected by the shipping pipeline; the remaining
//! metadata is used for console rendering and the envelope timestamp.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::level::Level;

/// Additional context associated with a log record.
#[derive(Clone, Debug)]
pub struct RecordMetadata {
    /// Rust module path where the log call originated.
    pub module_path: String,
    /// Source file name for the log call.
    pub filename: String,
    /// Line number in the source file.
    pub line_number: u32,
    /// Time the record was created.
    pub timestamp: SystemTime,
    /// Structured key-value pairs attached to the record.
    pub key_values: BTreeMap<String, String>,
}

impl Default for RecordMetadata {
    fn default() -> Self {
        Self {
            module_path: String::new(),
            filename: String::new(),
            line_number: 0,
            timestamp: SystemTime::now(),
            key_values: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogRecord {
    logger: String,
    level: Level,
    message: String,
    metadata: RecordMetadata,
}

impl LogRecord {
    /// Construct a new record from logger `name`, `level`, and `message`.
    pub fn new(logger: &str, level: Level, message: &str) -> Self {
        Self {
            logger: logger.to_owned(),
            level,
            message: message.to_owned(),
            metadata: RecordMetadata::default(),
        }
    }

    /// Construct a record with explicit source location and key-values.
    ///
    /// The timestamp is always captured at the call, overriding whatever
    /// `metadata` carried.
    pub fn with_metadata(
        logger: &str,
        level: Level,
        message: &str,
        mut metadata: RecordMetadata,
    ) -> Self {
        metadata.timestamp = SystemTime::now();
        Self {
            logger: logger.to_owned(),
            level,
            message: message.to_owned(),
            metadata,
        }
    }

    pub fn logger(&self) -> &str {
        &self.logger
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn metadata(&self) -> &RecordMetadata {
        &self.metadata
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> i64 {
        DateTime::<Utc>::from(self.metadata.timestamp).timestamp_millis()
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.level, self.message)
    }
}

/// Convert Rust module separators into dotted logger names.
pub(crate) fn normalise_target(target: &str) -> Cow<'_, str> {
    if target.contains("::") {
        Cow::Owned(target.replace("::", "."))
    } else {
        Cow::Borrowed(target)
    }
}

/// True for targets emitted by this crate's own diagnostics.
///
/// The host bridges skip these so a warning about a failed send can never
/// be fed back into the shipping pipeline.
pub(crate) fn is_internal_target(target: &str) -> bool {
    let crate_name = env!("CARGO_CRATE_NAME");
    target == crate_name
        || target
            .strip_prefix(crate_name)
            .is_some_and(|rest| rest.starts_with("::"))
}
