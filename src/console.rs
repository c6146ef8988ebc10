//! Synchronous console sink used for passthrough and diagnostics.
//!
//! Unlike a queued stream handler, every write happens on the caller's
//! thread before `handle` returns, so local visibility of a record never
//! depends on a worker being alive. Writes are serialised by a mutex so
//! lines from concurrent loggers do not interleave.

use std::{
    fmt,
    io::{self, Write},
    sync::Arc,
};

use log::warn;
use parking_lot::Mutex;

type BoxedWriter = Box<dyn Write + Send>;

/// Cloneable handle to a line-oriented writer.
///
/// Clones share the same underlying writer.
#[derive(Clone)]
pub struct ConsoleSink {
    writer: Arc<Mutex<BoxedWriter>>,
}

impl ConsoleSink {
    /// Wrap an arbitrary writer.
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Write `line` followed by a newline and flush.
    ///
    /// Write failures are reported through the `log` facade and otherwise
    /// ignored; a broken console must not interrupt the caller.
    pub fn write_line(&self, line: &str) {
        let result = {
            let mut writer = self.writer.lock();
            writeln!(writer, "{line}").and_then(|()| writer.flush())
        };
        if let Err(err) = result {
            warn!("vibex console write error: {err}");
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConsoleSink(<dyn Write>)")
    }
}
