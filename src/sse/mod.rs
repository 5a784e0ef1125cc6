//! SSE (Server-Sent Events) stream parser
//!
//! Parses the line-oriented SSE text format:
//! - `event: <type>` - event type line
//! - `data: <payload>` - data payload line, repeated lines join with `\n`
//! - Empty line - signals end of event
//! - Anything else (comments, `id:`, `retry:`) - ignored

pub mod events;
pub mod parser;

pub use events::{encode_events, SseEvent, SseLine, DEFAULT_EVENT_TYPE};
pub use parser::{parse_sse_line, ParserState, SseParser};
