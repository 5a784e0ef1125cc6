//! Scripted line source for testing.
//!
//! Replays a fixed sequence of lines and failures, and records how it was
//! used so tests can verify read and close behavior without a network.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::traits::LineSource;

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockRead {
    /// Return this line
    Line(String),
    /// Fail the read with this error
    Fail(io::ErrorKind, String),
}

/// Shared view of a [`MockLineSource`]'s activity.
///
/// Clones observe the same counters, so a handle can be kept after the source
/// itself has been moved into the reader.
#[derive(Debug, Clone, Default)]
pub struct MockSourceHandle {
    reads: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    reads_after_close: Arc<AtomicUsize>,
    lines_served: Arc<Mutex<Vec<String>>>,
}

impl MockSourceHandle {
    /// Number of `read_line` calls made.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `close` calls made.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Number of `read_line` calls made after the first close.
    pub fn reads_after_close(&self) -> usize {
        self.reads_after_close.load(Ordering::SeqCst)
    }

    /// Lines handed out so far, in order.
    pub fn lines_served(&self) -> Vec<String> {
        self.lines_served.lock().unwrap().clone()
    }
}

/// Mock line source.
///
/// # Example
///
/// ```ignore
/// use sse_reader::adapters::mock::MockLineSource;
///
/// let source = MockLineSource::from_text("event: ping\n\n")
///     .then_fail(std::io::ErrorKind::ConnectionReset, "peer went away");
/// let handle = source.handle();
/// // ... run the reader ...
/// assert_eq!(handle.close_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockLineSource {
    script: VecDeque<MockRead>,
    handle: MockSourceHandle,
    close_error: Option<(io::ErrorKind, String)>,
    cancel_after: Option<(usize, Arc<AtomicBool>)>,
    closed: bool,
}

impl MockLineSource {
    /// Create a source that is immediately at end of stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source replaying the given lines, then end of stream.
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let mut source = Self::new();
        for line in lines {
            source.script.push_back(MockRead::Line(line.into()));
        }
        source
    }

    /// Create a source from raw stream text.
    ///
    /// Splits on `\n` and strips a trailing `\r`, the way a real source
    /// removes terminators. A trailing newline does not produce an extra
    /// empty line.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }
        let body = text.strip_suffix('\n').unwrap_or(text);
        Self::from_lines(body.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)))
    }

    /// Append a line to the script.
    pub fn then_line(mut self, line: impl Into<String>) -> Self {
        self.script.push_back(MockRead::Line(line.into()));
        self
    }

    /// Append a read failure to the script.
    pub fn then_fail(mut self, kind: io::ErrorKind, message: impl Into<String>) -> Self {
        self.script.push_back(MockRead::Fail(kind, message.into()));
        self
    }

    /// Make `close` report an error (it is still counted).
    pub fn with_close_error(mut self, kind: io::ErrorKind, message: impl Into<String>) -> Self {
        self.close_error = Some((kind, message.into()));
        self
    }

    /// Raise `flag` once `reads` lines have been served.
    ///
    /// Simulates cancellation arriving while the consumer is processing.
    pub fn cancel_after_reads(mut self, reads: usize, flag: Arc<AtomicBool>) -> Self {
        self.cancel_after = Some((reads, flag));
        self
    }

    /// Get a handle for inspecting activity.
    pub fn handle(&self) -> MockSourceHandle {
        self.handle.clone()
    }
}

#[async_trait]
impl LineSource for MockLineSource {
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let reads = self.handle.reads.fetch_add(1, Ordering::SeqCst) + 1;
        if self.closed {
            self.handle.reads_after_close.fetch_add(1, Ordering::SeqCst);
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "mock source already closed",
            ));
        }

        if let Some((after, flag)) = &self.cancel_after {
            if reads >= *after {
                flag.store(true, Ordering::SeqCst);
            }
        }

        match self.script.pop_front() {
            Some(MockRead::Line(line)) => {
                self.handle.lines_served.lock().unwrap().push(line.clone());
                Ok(Some(line))
            }
            Some(MockRead::Fail(kind, message)) => Err(io::Error::new(kind, message)),
            None => Ok(None),
        }
    }

    async fn close(&mut self) -> io::Result<()> {
        self.handle.closes.fetch_add(1, Ordering::SeqCst);
        self.closed = true;
        match &self.close_error {
            Some((kind, message)) => Err(io::Error::new(*kind, message.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_script_then_eof() {
        let mut source = MockLineSource::from_lines(["a", "b"]);
        assert_eq!(source.read_line().await.unwrap(), Some("a".to_string()));
        assert_eq!(source.read_line().await.unwrap(), Some("b".to_string()));
        assert_eq!(source.read_line().await.unwrap(), None);
        assert_eq!(source.handle().read_count(), 3);
    }

    #[tokio::test]
    async fn test_from_text_strips_terminators() {
        let source = MockLineSource::from_text("event: x\r\ndata: y\n\n");
        let handle = source.handle();
        let mut source = source;
        while source.read_line().await.unwrap().is_some() {}
        assert_eq!(handle.lines_served(), vec!["event: x", "data: y", ""]);
    }

    #[tokio::test]
    async fn test_from_text_empty_is_immediate_eof() {
        let mut source = MockLineSource::from_text("");
        assert_eq!(source.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let mut source = MockLineSource::new().then_fail(io::ErrorKind::TimedOut, "slow");
        let err = source.read_line().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[tokio::test]
    async fn test_close_counts_and_reports_error() {
        let mut source = MockLineSource::new().with_close_error(io::ErrorKind::Other, "stuck");
        let handle = source.handle();

        assert!(source.close().await.is_err());
        assert_eq!(handle.close_count(), 1);

        assert!(source.read_line().await.is_err());
        assert_eq!(handle.reads_after_close(), 1);
    }

    #[tokio::test]
    async fn test_cancel_after_reads_raises_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut source =
            MockLineSource::from_lines(["a", "b", "c"]).cancel_after_reads(2, Arc::clone(&flag));

        source.read_line().await.unwrap();
        assert!(!flag.load(Ordering::SeqCst));
        source.read_line().await.unwrap();
        assert!(flag.load(Ordering::SeqCst));
    }
}
