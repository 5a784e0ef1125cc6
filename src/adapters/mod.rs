//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ByteStreamSource`] - lines from byte chunks: HTTP bodies, `AsyncRead`s
//! - [`LineBuffer`] - the chunk-to-line splitter behind it
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockLineSource`] - scripted lines, failures and close errors

pub mod byte_stream;
pub mod line_buffer;
pub mod mock;

pub use byte_stream::{BoxByteStream, ByteStreamSource, ResponseSource};
pub use line_buffer::LineBuffer;
pub use mock::MockLineSource;
