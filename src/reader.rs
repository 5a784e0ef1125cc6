//! Stream reader: drives a [`LineSource`] through the SSE parser.
//!
//! The reader owns the source for the duration of a run, checks the
//! cancellation signal once per line before the next read, hands each
//! completed event to the consumer in-line, and closes the source exactly
//! once on the way out, whatever the outcome.
//!
//! Two consumption styles are offered:
//! - [`StreamReader::run`] invokes a synchronous callback per event
//! - [`StreamReader::events`] yields events lazily as a [`Stream`]

use futures_util::stream::{self, Stream, StreamExt};

use crate::config::ReaderConfig;
use crate::error::{StreamError, StreamResult};
use crate::sse::{SseEvent, SseParser};
use crate::traits::{CancelSignal, LineSource};

/// Why a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The source reported end of stream; any trailing block was flushed.
    EndOfStream,
    /// Cancellation was observed between lines; any partial block was discarded.
    Cancelled,
}

/// Counters for one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub termination: Termination,
    /// Lines read from the source
    pub lines_read: u64,
    /// Events handed to the consumer
    pub events_dispatched: u64,
}

/// Reads an SSE stream and dispatches events.
///
/// A reader holds only configuration; every run builds a fresh parser, so one
/// reader may serve any number of sequential or concurrent runs.
///
/// # Example
///
/// ```ignore
/// use sse_reader::adapters::ByteStreamSource;
/// use sse_reader::traits::NeverCancel;
/// use sse_reader::StreamReader;
///
/// let source = ByteStreamSource::from_response(response);
/// StreamReader::new()
///     .run(NeverCancel, source, |event| println!("{}: {}", event.kind(), event.data))
///     .await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StreamReader {
    config: ReaderConfig,
}

impl StreamReader {
    /// Create a reader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with the given configuration.
    ///
    /// Only `flush_on_eof` affects the reader. `max_line_bytes` is enforced
    /// by byte-backed sources, so pass it to
    /// [`ByteStreamSource::with_max_line_bytes`](crate::adapters::ByteStreamSource::with_max_line_bytes)
    /// when building the source.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read `source` until end of stream, cancellation or a read failure,
    /// calling `on_event` for each completed event.
    ///
    /// # Returns
    /// - `Ok(Termination::EndOfStream)` after a clean end; a trailing
    ///   unterminated block is dispatched first
    /// - `Ok(Termination::Cancelled)` when `cancel` was raised; the partial
    ///   block is dropped
    /// - `Err(StreamError::Read)` on a read failure; the partial block is
    ///   dropped
    ///
    /// The source is closed exactly once before returning. A close failure is
    /// logged and does not affect the result.
    pub async fn run<C, S, F>(&self, cancel: C, source: S, on_event: F) -> StreamResult<Termination>
    where
        C: CancelSignal,
        S: LineSource,
        F: FnMut(SseEvent),
    {
        self.run_with_stats(cancel, source, on_event)
            .await
            .map(|stats| stats.termination)
    }

    /// Like [`run`](Self::run), also reporting line and event counts.
    pub async fn run_with_stats<C, S, F>(
        &self,
        cancel: C,
        mut source: S,
        mut on_event: F,
    ) -> StreamResult<RunStats>
    where
        C: CancelSignal,
        S: LineSource,
        F: FnMut(SseEvent),
    {
        let outcome = self.drive(&cancel, &mut source, &mut on_event).await;
        close_source(&mut source).await;

        match &outcome {
            Ok(stats) => tracing::debug!(
                termination = ?stats.termination,
                lines = stats.lines_read,
                events = stats.events_dispatched,
                "SSE stream finished"
            ),
            Err(e) => tracing::debug!(error = %e, "SSE stream failed"),
        }
        outcome
    }

    async fn drive<C, S, F>(&self, cancel: &C, source: &mut S, on_event: &mut F) -> StreamResult<RunStats>
    where
        C: CancelSignal,
        S: LineSource,
        F: FnMut(SseEvent),
    {
        let mut parser = SseParser::new();
        let mut lines_read = 0u64;
        let mut events_dispatched = 0u64;
        let mut dispatch = |event: SseEvent| {
            tracing::trace!(
                event_type = %event.kind(),
                data_len = event.data.len(),
                "dispatching SSE event"
            );
            events_dispatched += 1;
            on_event(event);
        };

        let termination = loop {
            if cancel.is_cancelled() {
                if parser.has_pending() {
                    tracing::debug!("cancelled with a partial SSE block pending, discarding it");
                }
                break Termination::Cancelled;
            }

            match source.read_line().await {
                Ok(Some(line)) => {
                    lines_read += 1;
                    if let Some(event) = parser.feed_line(&line) {
                        dispatch(event);
                    }
                }
                Ok(None) => {
                    if self.config.flush_on_eof {
                        if let Some(event) = parser.flush() {
                            dispatch(event);
                        }
                    } else if parser.has_pending() {
                        tracing::debug!("end of stream with an unterminated SSE block, discarding it");
                    }
                    break Termination::EndOfStream;
                }
                Err(e) => return Err(StreamError::read(lines_read, e)),
            }
        };

        Ok(RunStats {
            termination,
            lines_read,
            events_dispatched,
        })
    }

    /// Lazily read events from `source`.
    ///
    /// Yields the same events, in the same order, as [`run`](Self::run). The
    /// stream ends after end of stream or cancellation, or after yielding a
    /// single `Err` for a read failure. The source is closed exactly once when
    /// the stream reaches its end; dropping the stream early drops the source
    /// without an explicit close. Polling again after the end keeps yielding
    /// `None`.
    ///
    /// The returned stream is not `Unpin`; pin it before polling.
    pub fn events<C, S>(&self, cancel: C, source: S) -> impl Stream<Item = StreamResult<SseEvent>> + Send
    where
        C: CancelSignal + Send,
        S: LineSource,
    {
        let state = EventsState {
            cancel,
            source,
            parser: SseParser::new(),
            lines_read: 0,
            flush_on_eof: self.config.flush_on_eof,
            done: false,
        };

        stream::unfold(state, |mut state| async move {
            // Set after a yielded error or trailing event; the next poll ends.
            if state.done {
                return None;
            }
            loop {
                if state.cancel.is_cancelled() {
                    state.finish().await;
                    return None;
                }

                match state.source.read_line().await {
                    Ok(Some(line)) => {
                        state.lines_read += 1;
                        if let Some(event) = state.parser.feed_line(&line) {
                            return Some((Ok(event), state));
                        }
                    }
                    Ok(None) => {
                        let tail = if state.flush_on_eof {
                            state.parser.flush()
                        } else {
                            None
                        };
                        state.finish().await;
                        return tail.map(|event| (Ok(event), state));
                    }
                    Err(e) => {
                        let err = StreamError::read(state.lines_read, e);
                        state.finish().await;
                        return Some((Err(err), state));
                    }
                }
            }
        })
        .fuse()
    }
}

struct EventsState<C, S> {
    cancel: C,
    source: S,
    parser: SseParser,
    lines_read: u64,
    flush_on_eof: bool,
    done: bool,
}

impl<C, S: LineSource> EventsState<C, S> {
    async fn finish(&mut self) {
        if !self.done {
            self.done = true;
            close_source(&mut self.source).await;
        }
    }
}

/// Read `source` with a default [`StreamReader`].
pub async fn read_sse_stream<C, S, F>(cancel: C, source: S, on_event: F) -> StreamResult<Termination>
where
    C: CancelSignal,
    S: LineSource,
    F: FnMut(SseEvent),
{
    StreamReader::new().run(cancel, source, on_event).await
}

async fn close_source<S: LineSource + ?Sized>(source: &mut S) {
    if let Err(e) = source.close().await {
        tracing::warn!(error = %e, "Error closing SSE source");
    }
}
