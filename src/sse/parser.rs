//! SSE stream parsing logic
//!
//! Contains the line classifier and the stateful [`SseParser`] that
//! accumulates `event:`/`data:` fields and emits complete events at block
//! boundaries.

use crate::sse::events::{SseEvent, SseLine};

/// Classify a single SSE line.
///
/// The line must already have its terminator removed. Field values are
/// trimmed of surrounding whitespace; anything that is not an `event:` or
/// `data:` field or an empty line is reported as [`SseLine::Other`].
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    SseLine::Other(line.to_string())
}

/// Whether the parser is holding part of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    /// Nothing accumulated since the last dispatch
    #[default]
    Idle,
    /// At least one field line seen since the last dispatch
    Accumulating,
}

/// Stateful SSE parser that accumulates lines and emits complete events
#[derive(Debug, Default)]
pub struct SseParser {
    /// Current event type being accumulated
    event_type: String,
    /// Data lines joined so far
    data: String,
    state: ParserState,
}

impl SseParser {
    /// Create a new SSE parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line to the parser, potentially returning a complete event
    ///
    /// Returns `Some(event)` when the line is a blank block terminator and
    /// the accumulated block is non-trivial.
    pub fn feed_line(&mut self, line: &str) -> Option<SseEvent> {
        match parse_sse_line(line) {
            SseLine::Event(event_type) => {
                // A later `event:` replaces the earlier one rather than appending
                self.event_type = event_type;
                self.state = ParserState::Accumulating;
                None
            }
            SseLine::Data(data) => {
                if !self.data.is_empty() {
                    self.data.push('\n');
                }
                self.data.push_str(&data);
                self.state = ParserState::Accumulating;
                None
            }
            SseLine::Empty => self.flush(),
            SseLine::Other(other) => {
                tracing::trace!(line = %other, "ignoring unrecognized SSE line");
                None
            }
        }
    }

    /// Emit the pending block, if any, and return to [`ParserState::Idle`].
    ///
    /// Used both at blank-line boundaries and at end of stream.
    pub fn flush(&mut self) -> Option<SseEvent> {
        self.state = ParserState::Idle;
        if self.event_type.is_empty() && self.data.is_empty() {
            return None;
        }
        Some(SseEvent {
            event_type: std::mem::take(&mut self.event_type),
            data: std::mem::take(&mut self.data),
        })
    }

    /// Reset the parser state, discarding any partial block
    pub fn reset(&mut self) {
        self.event_type.clear();
        self.data.clear();
        self.state = ParserState::Idle;
    }

    /// Current accumulation state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// True when a blank line or flush would dispatch an event.
    pub fn has_pending(&self) -> bool {
        !self.event_type.is_empty() || !self.data.is_empty()
    }
}
