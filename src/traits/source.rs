//! Line source trait abstraction.
//!
//! Decouples the reader from where bytes come from, enabling dependency
//! injection and scripted sources in tests.

use async_trait::async_trait;
use std::io;

/// A sequential, closable source of text lines.
///
/// # Contract
///
/// - `read_line` returns `Ok(Some(line))` with the line terminator already
///   removed, `Ok(None)` once the stream has ended cleanly, and `Err(_)` for
///   any other failure.
/// - `close` releases the underlying resource. Calling it more than once
///   must be harmless.
///
/// # Example
///
/// ```ignore
/// use sse_reader::traits::LineSource;
///
/// async fn count_lines<S: LineSource>(source: &mut S) -> std::io::Result<usize> {
///     let mut n = 0;
///     while source.read_line().await?.is_some() {
///         n += 1;
///     }
///     source.close().await?;
///     Ok(n)
/// }
/// ```
#[async_trait]
pub trait LineSource: Send {
    /// Read the next line, or `None` at end of stream.
    async fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Release the source.
    async fn close(&mut self) -> io::Result<()>;
}

#[async_trait]
impl<S: LineSource + ?Sized> LineSource for Box<S> {
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line().await
    }

    async fn close(&mut self) -> io::Result<()> {
        (**self).close().await
    }
}
