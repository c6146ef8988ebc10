//! In-memory console capture for assertions on passthrough and diagnostics.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::console::ConsoleSink;

/// Read side of a captured console.
#[derive(Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8(self.buffer.lock().clone()).expect("console output is UTF-8")
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Return a sink writing into memory together with its reader.
pub fn captured_console() -> (ConsoleSink, CapturedOutput) {
    let output = CapturedOutput::default();
    let sink = ConsoleSink::new(CaptureWriter(Arc::clone(&output.buffer)));
    (sink, output)
}
