//! Shared helpers for integration tests.

pub mod mock_server;

#[allow(unused_imports)]
pub use mock_server::{CapturedRequest, spawn_ingest_server, spawn_raw_server, tcp_listener};
