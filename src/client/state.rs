//! Enabled/disabled state of a client.
//!
//! The state lives in a single atomic owned by one client instance. The only
//! transition after construction is `Enabled -> Disabled(Killed)`, performed
//! with a compare-exchange so racing senders cannot corrupt the flag.

use std::sync::atomic::{AtomicU8, Ordering};

/// Why a client stopped sending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisableReason {
    /// Token or session identifier missing at construction.
    InvalidConfig,
    /// The ingest API rejected the token (401/403).
    Killed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientState {
    Enabled,
    Disabled(DisableReason),
}

impl ClientState {
    pub fn is_enabled(self) -> bool {
        matches!(self, ClientState::Enabled)
    }
}

const ENABLED: u8 = 0;
const INVALID_CONFIG: u8 = 1;
const KILLED: u8 = 2;

fn encode(state: ClientState) -> u8 {
    match state {
        ClientState::Enabled => ENABLED,
        ClientState::Disabled(DisableReason::InvalidConfig) => INVALID_CONFIG,
        ClientState::Disabled(DisableReason::Killed) => KILLED,
    }
}

fn decode(raw: u8) -> ClientState {
    match raw {
        ENABLED => ClientState::Enabled,
        INVALID_CONFIG => ClientState::Disabled(DisableReason::InvalidConfig),
        _ => ClientState::Disabled(DisableReason::Killed),
    }
}

#[derive(Debug)]
pub(crate) struct StateCell {
    raw: AtomicU8,
}

impl StateCell {
    pub(crate) fn new(initial: ClientState) -> Self {
        Self {
            raw: AtomicU8::new(encode(initial)),
        }
    }

    pub(crate) fn load(&self) -> ClientState {
        decode(self.raw.load(Ordering::Acquire))
    }

    /// Trip the kill switch.
    ///
    /// Returns `true` only for the caller that moved the state out of
    /// `Enabled`; later or concurrent callers observe `false`.
    pub(crate) fn kill(&self) -> bool {
        self.raw
            .compare_exchange(ENABLED, KILLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
