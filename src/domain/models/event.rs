use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Interim status from the wizard service, surfaced in the view before
/// the first content token arrives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressNote {
    pub step: String,
    pub detail: Option<String>,
}

/// One event on an open interview stream. This is also the NDJSON wire
/// shape emitted by the wizard service, one event per line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    Token { text: String },
    Progress { step: String, detail: Option<String> },
    Complete,
    Error { message: String },
}

impl StreamEvent {
    /// A stream must end with exactly one terminal event unless it is
    /// cancelled first.
    pub fn is_terminal(&self) -> bool {
        return matches!(self, StreamEvent::Complete | StreamEvent::Error { .. });
    }
}

/// A stream event tagged with the id of the stream that produced it.
/// Events carrying a stale id belong to a cancelled or superseded stream
/// and are dropped by the session instead of resurrecting a buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamSignal {
    pub stream_id: u64,
    pub event: StreamEvent,
}
