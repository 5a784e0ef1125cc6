//! Line source over a stream of byte chunks.
//!
//! Covers HTTP response bodies (`reqwest::Response::bytes_stream`) and any
//! `AsyncRead` such as stdin, files or sockets (via [`ReaderStream`]).

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures_util::stream::{Stream, StreamExt};
use std::io;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use crate::adapters::line_buffer::LineBuffer;
use crate::config::DEFAULT_MAX_LINE_BYTES;
use crate::traits::LineSource;

/// Boxed byte-chunk stream with errors already mapped to `io::Error`.
pub type BoxByteStream = BoxStream<'static, io::Result<Bytes>>;

/// Line source for an HTTP response body.
pub type ResponseSource = ByteStreamSource<BoxByteStream>;

/// Adapts a chunked byte stream into a [`LineSource`].
///
/// Closing drops the underlying stream, which for an HTTP body releases the
/// connection.
pub struct ByteStreamSource<S> {
    stream: Option<S>,
    buffer: LineBuffer,
    eof: bool,
}

impl<S> ByteStreamSource<S> {
    /// Wrap a stream using the default line length limit.
    pub fn new(stream: S) -> Self {
        Self::with_max_line_bytes(stream, DEFAULT_MAX_LINE_BYTES)
    }

    /// Wrap a stream with a custom line length limit.
    pub fn with_max_line_bytes(stream: S, max_line_bytes: usize) -> Self {
        Self {
            stream: Some(stream),
            buffer: LineBuffer::new(max_line_bytes),
            eof: false,
        }
    }

    /// True once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }
}

impl<R> ByteStreamSource<ReaderStream<R>>
where
    R: AsyncRead,
{
    /// Read lines from any async reader.
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReaderStream::new(reader))
    }
}

impl ResponseSource {
    /// Read lines from an HTTP response body.
    ///
    /// The response status is not inspected; callers decide what a
    /// non-success status means before handing the body over.
    pub fn from_response(response: reqwest::Response) -> Self {
        Self::from_response_with_limit(response, DEFAULT_MAX_LINE_BYTES)
    }

    /// Like [`from_response`](Self::from_response) with a custom line length limit.
    pub fn from_response_with_limit(response: reqwest::Response, max_line_bytes: usize) -> Self {
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(reqwest_to_io))
            .boxed();
        Self::with_max_line_bytes(body, max_line_bytes)
    }
}

fn reqwest_to_io(err: reqwest::Error) -> io::Error {
    let kind = if err.is_timeout() {
        io::ErrorKind::TimedOut
    } else {
        io::ErrorKind::ConnectionAborted
    };
    io::Error::new(kind, err)
}

#[async_trait]
impl<S, B, E> LineSource for ByteStreamSource<S>
where
    S: Stream<Item = Result<B, E>> + Send + Unpin,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<Box<dyn std::error::Error + Send + Sync>> + Send + 'static,
{
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(line) = self.buffer.next_line()? {
                return Ok(Some(line));
            }
            if self.eof {
                return Ok(self.buffer.finish());
            }

            let stream = self.stream.as_mut().ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotConnected, "SSE source already closed")
            })?;

            match stream.next().await {
                Some(Ok(chunk)) => self.buffer.extend(chunk.as_ref()),
                Some(Err(e)) => return Err(into_io(e.into())),
                None => self.eof = true,
            }
        }
    }

    async fn close(&mut self) -> io::Result<()> {
        if self.stream.take().is_some() {
            tracing::debug!(
                pending_bytes = self.buffer.pending_bytes(),
                "closed SSE byte stream"
            );
        }
        Ok(())
    }
}

/// Keep `io::Error`s as they are instead of nesting them.
fn into_io(err: Box<dyn std::error::Error + Send + Sync>) -> io::Error {
    match err.downcast::<io::Error>() {
        Ok(io_err) => *io_err,
        Err(other) => io::Error::new(io::ErrorKind::Other, other),
    }
}
