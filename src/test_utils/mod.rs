//! Test-only helpers shared across crate unit tests.

mod captured_output;
mod collecting_handler;
mod scripted_transport;

pub use captured_output::{CapturedOutput, captured_console};
pub use collecting_handler::CollectingHandler;
pub use scripted_transport::{CapturedPost, ScriptedTransport};
