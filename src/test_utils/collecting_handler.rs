//! A handler that accumulates records in memory for test assertions.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::handler::LogHandler;
use crate::log_record::LogRecord;

/// Handler that stores every record it receives for later inspection.
#[derive(Clone, Default)]
pub struct CollectingHandler {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl CollectingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a snapshot of all records received so far.
    pub fn collected(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }
}

impl LogHandler for CollectingHandler {
    fn handle(&self, record: &LogRecord) {
        self.records.lock().push(record.clone());
    }
}
