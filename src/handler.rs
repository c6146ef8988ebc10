use std::sync::Arc;

use crate::log_record::LogRecord;

/// Capability implemented by every record handler.
///
/// Host bridges depend only on this trait. Implementations are invoked from
/// whichever thread emitted the record, return nothing, and must never
/// panic or block indefinitely.
pub trait LogHandler: Send + Sync {
    fn handle(&self, record: &LogRecord);
}

impl<T: LogHandler + ?Sized> LogHandler for Arc<T> {
    fn handle(&self, record: &LogRecord) {
        (**self).handle(record);
    }
}

impl<T: LogHandler + ?Sized> LogHandler for Box<T> {
    fn handle(&self, record: &LogRecord) {
        (**self).handle(record);
    }
}
