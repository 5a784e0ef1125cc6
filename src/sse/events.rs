//! SSE event types and definitions
//!
//! Contains the [`SseEvent`] value handed to consumers, the [`SseLine`]
//! classification of a single stream line, and the encoder that writes events
//! back out in wire syntax.

use serde::{Deserialize, Serialize};

/// Event type reported for blocks that carry no `event:` field.
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// A single dispatched SSE event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SseEvent {
    /// Value of the last `event:` field in the block, empty when absent
    #[serde(default)]
    pub event_type: String,
    /// `data:` field values joined with `\n`
    #[serde(default)]
    pub data: String,
}

impl SseEvent {
    /// Create an event from its type and payload.
    pub fn new(event_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            data: data.into(),
        }
    }

    /// Create an untyped event (dispatched as `message`).
    pub fn message(data: impl Into<String>) -> Self {
        Self::new(String::new(), data)
    }

    /// Returns the effective event type, `message` when none was sent.
    pub fn kind(&self) -> &str {
        if self.event_type.is_empty() {
            DEFAULT_EVENT_TYPE
        } else {
            &self.event_type
        }
    }

    /// True when neither field carries anything.
    pub fn is_empty(&self) -> bool {
        self.event_type.is_empty() && self.data.is_empty()
    }

    /// Encode this event as one wire block, including the terminating blank line.
    ///
    /// Data lines are written one per `data:` field. Values are written with a
    /// single separating space; readers trim surrounding whitespace, so values
    /// with leading or trailing whitespace do not survive a round trip.
    pub fn to_wire(&self) -> String {
        let mut out = String::with_capacity(self.event_type.len() + self.data.len() + 16);
        if !self.event_type.is_empty() {
            out.push_str("event: ");
            out.push_str(&self.event_type);
            out.push('\n');
        }
        if !self.data.is_empty() {
            for line in self.data.split('\n') {
                out.push_str("data: ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push('\n');
        out
    }
}

/// Encode a sequence of events into a single SSE text body.
pub fn encode_events<'a, I>(events: I) -> String
where
    I: IntoIterator<Item = &'a SseEvent>,
{
    events.into_iter().map(SseEvent::to_wire).collect()
}

/// Represents a classified SSE line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: update"), value trimmed
    Event(String),
    /// Data payload line (e.g., "data: hello"), value trimmed
    Data(String),
    /// Empty line - signals end of event
    Empty,
    /// Comments and unrecognized fields; carried verbatim and ignored
    Other(String),
}
