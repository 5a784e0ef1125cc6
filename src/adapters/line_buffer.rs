//! Byte chunk to line splitting.
//!
//! Network bodies arrive in arbitrary chunks; a line may span several chunks
//! and a chunk may hold several lines. [`LineBuffer`] holds the unterminated
//! tail between chunks.

use bytes::{Buf, BytesMut};
use std::io;

/// Accumulates raw bytes and yields terminator-stripped lines.
#[derive(Debug)]
pub struct LineBuffer {
    buf: BytesMut,
    max_line_bytes: usize,
    /// Prefix of `buf` already scanned for a newline
    scanned: usize,
}

impl LineBuffer {
    /// Create a buffer rejecting lines longer than `max_line_bytes`.
    pub fn new(max_line_bytes: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            max_line_bytes,
            scanned: 0,
        }
    }

    /// Append a chunk of bytes.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Pop the next complete line, if one is buffered.
    ///
    /// Fails with `InvalidData` when the pending line grows past the limit
    /// without a terminator.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        match self.buf[self.scanned..].iter().position(|&b| b == b'\n') {
            Some(offset) => {
                let end = self.scanned + offset;
                let line = self.buf.split_to(end);
                self.buf.advance(1);
                self.scanned = 0;
                self.check_len(&line)?;
                Ok(Some(decode_line(&line)))
            }
            None => {
                self.scanned = self.buf.len();
                self.check_len(&self.buf)?;
                Ok(None)
            }
        }
    }

    /// Take the unterminated remainder at end of stream.
    ///
    /// A final line without a trailing newline is still a line.
    pub fn finish(&mut self) -> Option<String> {
        self.scanned = 0;
        if self.buf.is_empty() {
            return None;
        }
        let rest = self.buf.split();
        Some(decode_line(&rest))
    }

    /// Bytes held but not yet returned as a line.
    pub fn pending_bytes(&self) -> usize {
        self.buf.len()
    }

    /// A trailing `\r` belongs to the terminator and is not counted.
    fn check_len(&self, line: &[u8]) -> io::Result<()> {
        if strip_cr(line).len() > self.max_line_bytes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "SSE line exceeds {} bytes without a terminator",
                    self.max_line_bytes
                ),
            ));
        }
        Ok(())
    }
}

fn strip_cr(raw: &[u8]) -> &[u8] {
    raw.strip_suffix(b"\r").unwrap_or(raw)
}

/// Strip one trailing `\r` and decode, replacing invalid UTF-8.
fn decode_line(raw: &[u8]) -> String {
    let raw = strip_cr(raw);
    match std::str::from_utf8(raw) {
        Ok(s) => s.to_string(),
        Err(_) => {
            tracing::warn!("Received invalid UTF-8 in SSE stream, replacing bytes");
            String::from_utf8_lossy(raw).into_owned()
        }
    }
}
