//! sse-reader - incremental Server-Sent Events stream reader
//!
//! Reads a long-lived SSE text stream line by line, accumulates `event:` and
//! `data:` fields, and hands each completed event to a consumer, with
//! cooperative cancellation between lines.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod reader;
pub mod sse;
pub mod traits;

pub use config::ReaderConfig;
pub use error::{StreamError, StreamResult};
pub use reader::{read_sse_stream, RunStats, StreamReader, Termination};
pub use sse::{SseEvent, SseParser};
