//! Wire envelope posted to the ingest API.
//!
//! The body carries the session at the top level and a single entry in
//! `logs`:
//!
//! ```json
//! {"sessionId": "...", "logs": [{"type": "json", "payload": {...}, "timestamp": 1700000000000}]}
//! ```

use chrono::Utc;
use serde::Serialize;

/// One log, addressed to one session, stamped in milliseconds.
///
/// Built fresh for each send and dropped once the request completes.
#[derive(Debug)]
pub struct LogEnvelope<'a, P: ?Sized> {
    pub kind: &'a str,
    pub payload: &'a P,
    pub session_id: &'a str,
    pub timestamp: i64,
}

#[derive(Serialize)]
struct WireBody<'a, P: ?Sized + Serialize> {
    #[serde(rename = "sessionId")]
    session_id: &'a str,
    logs: [WireLog<'a, P>; 1],
}

#[derive(Serialize)]
struct WireLog<'a, P: ?Sized + Serialize> {
    #[serde(rename = "type")]
    kind: &'a str,
    payload: &'a P,
    timestamp: i64,
}

impl<'a, P> LogEnvelope<'a, P>
where
    P: Serialize + ?Sized,
{
    /// Stamp the envelope with `timestamp`, or with the current time.
    pub fn new(kind: &'a str, payload: &'a P, session_id: &'a str, timestamp: Option<i64>) -> Self {
        Self {
            kind,
            payload,
            session_id,
            timestamp: timestamp.unwrap_or_else(|| Utc::now().timestamp_millis()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let body = WireBody {
            session_id: self.session_id,
            logs: [WireLog {
                kind: self.kind,
                payload: self.payload,
                timestamp: self.timestamp,
            }],
        };
        serde_json::to_string(&body)
    }
}
