//! Transport double that replays scripted responses and records each POST.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::client::{Transport, TransportError};

/// One request observed by [`ScriptedTransport`].
#[derive(Clone, Debug)]
pub struct CapturedPost {
    pub url: String,
    pub token: String,
    pub body: serde_json::Value,
}

/// Replays queued responses in order; answers 200 once the script runs out.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<u16, TransportError>>>,
    calls: Mutex<Vec<CapturedPost>>,
}

impl ScriptedTransport {
    pub fn with_statuses(statuses: &[u16]) -> Self {
        Self::with_responses(statuses.iter().map(|&status| Ok(status)))
    }

    pub fn with_responses(
        responses: impl IntoIterator<Item = Result<u16, TransportError>>,
    ) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<CapturedPost> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Transport for ScriptedTransport {
    fn post(&self, url: &str, token: &str, body: &str) -> Result<u16, TransportError> {
        self.calls.lock().push(CapturedPost {
            url: url.to_owned(),
            token: token.to_owned(),
            body: serde_json::from_str(body).expect("client posts valid JSON"),
        });
        self.responses.lock().pop_front().unwrap_or(Ok(200))
    }
}
