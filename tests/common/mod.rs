//! Common test utilities for integration tests.
//!
//! Helpers for running the reader over scripted sources and collecting what
//! the consumer saw.

#![allow(dead_code)]

use sse_reader::adapters::mock::{MockLineSource, MockSourceHandle};
use sse_reader::traits::NeverCancel;
use sse_reader::{SseEvent, StreamReader, StreamResult, Termination};

/// Outcome of one run over a mock source.
pub struct Observed {
    pub result: StreamResult<Termination>,
    pub events: Vec<SseEvent>,
    pub source: MockSourceHandle,
}

/// Run a default reader over `source` without cancellation.
pub async fn run_source(source: MockLineSource) -> Observed {
    let handle = source.handle();
    let mut events = Vec::new();
    let result = StreamReader::new()
        .run(NeverCancel, source, |event| events.push(event))
        .await;
    Observed {
        result,
        events,
        source: handle,
    }
}

/// Run a default reader over raw stream text.
pub async fn run_text(text: &str) -> Observed {
    run_source(MockLineSource::from_text(text)).await
}
