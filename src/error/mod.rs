//! Error types for SSE stream reading.
//!
//! | Condition | Surfaced as |
//! |-----------|-------------|
//! | Clean end of stream | `Ok(Termination::EndOfStream)` |
//! | Cancellation | `Ok(Termination::Cancelled)` |
//! | Read failure | `Err(StreamError::Read { .. })` |
//! | Close failure | `tracing::warn!`, result unchanged |

mod stream;

pub use stream::StreamError;

/// Result alias used throughout the crate.
pub type StreamResult<T> = Result<T, StreamError>;
