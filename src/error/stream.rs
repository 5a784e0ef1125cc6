//! Streaming-related error types.
//!
//! Only genuine read failures from the source surface as errors. Clean end of
//! stream and cancellation are normal terminations, and a failure to close the
//! source is logged rather than returned.

use std::io;
use thiserror::Error;

/// Errors returned by [`StreamReader`](crate::reader::StreamReader).
#[derive(Debug, Error)]
pub enum StreamError {
    /// The source failed with something other than end of stream.
    #[error("failed to read SSE stream after {lines_read} lines: {source}")]
    Read {
        /// Lines successfully read before the failure
        lines_read: u64,
        #[source]
        source: io::Error,
    },
}

impl StreamError {
    /// Wrap a source read failure.
    pub fn read(lines_read: u64, source: io::Error) -> Self {
        StreamError::Read { lines_read, source }
    }

    /// The underlying I/O error kind.
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            StreamError::Read { source, .. } => source.kind(),
        }
    }

    /// Check if this error is likely transient and the caller may reconnect.
    ///
    /// This layer never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.io_kind(),
            io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::BrokenPipe
                | io::ErrorKind::TimedOut
                | io::ErrorKind::UnexpectedEof
                | io::ErrorKind::Interrupted
        )
    }
}
