//! Behavioral properties of the stream reader.
//!
//! Covers dispatch counting, field joining, termination paths and the
//! close-exactly-once guarantee over scripted sources.

mod common;

use common::{run_source, run_text};
use sse_reader::adapters::mock::MockLineSource;
use sse_reader::sse::encode_events;
use sse_reader::{SseEvent, StreamError, StreamReader, Termination};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_multi_line_data_joins_with_newline() {
    let observed = run_text("data:a\ndata:b\n\n").await;

    assert_eq!(observed.result.unwrap(), Termination::EndOfStream);
    assert_eq!(observed.events, vec![SseEvent::message("a\nb")]);
}

#[tokio::test]
async fn test_event_only_block() {
    let observed = run_text("event: foo\n\n").await;
    assert_eq!(observed.events, vec![SseEvent::new("foo", "")]);
}

#[tokio::test]
async fn test_consecutive_blank_lines_after_event_dispatch_once() {
    let observed = run_text("data: x\n\n\n").await;
    assert_eq!(observed.events.len(), 1);
}

#[tokio::test]
async fn test_dispatch_count_matches_non_trivial_blocks() {
    // Three terminated non-trivial blocks, two trivial ones, and an
    // unterminated trailing block.
    let text = "\
: stream opened

event: one
data: 1

data:

: comment only

data: 2
data: 3

event: three

event: tail
data: unterminated";
    let observed = run_text(text).await;

    assert_eq!(observed.result.unwrap(), Termination::EndOfStream);
    assert_eq!(
        observed.events,
        vec![
            SseEvent::new("one", "1"),
            SseEvent::message("2\n3"),
            SseEvent::new("three", ""),
            SseEvent::new("tail", "unterminated"),
        ]
    );
}

#[tokio::test]
async fn test_crlf_terminators() {
    let observed = run_text("event: win\r\ndata: crlf\r\n\r\n").await;
    assert_eq!(observed.events, vec![SseEvent::new("win", "crlf")]);
}

#[tokio::test]
async fn test_unknown_fields_never_error() {
    let observed = run_text("id: 1\nretry: 10\n:\nfoo\nbar: baz\n\n").await;

    assert!(observed.result.is_ok());
    assert!(observed.events.is_empty());
}

#[tokio::test]
async fn test_cancel_before_any_read() {
    let source = MockLineSource::from_text("data: a\n\n");
    let handle = source.handle();
    let cancel = Arc::new(AtomicBool::new(true));
    let mut events = Vec::new();

    let result = StreamReader::new()
        .run(cancel, source, |event| events.push(event))
        .await;

    assert_eq!(result.unwrap(), Termination::Cancelled);
    assert!(events.is_empty());
    assert_eq!(handle.read_count(), 0);
}

#[tokio::test]
async fn test_read_failure_after_one_event() {
    let source = MockLineSource::from_text("event: first\ndata: ok\n\nevent: second\ndata: part")
        .then_fail(io::ErrorKind::ConnectionAborted, "body stream aborted");
    let observed = run_source(source).await;

    let err = observed.result.unwrap_err();
    assert!(matches!(err, StreamError::Read { .. }));
    assert!(err.to_string().contains("body stream aborted"));
    assert_eq!(observed.events, vec![SseEvent::new("first", "ok")]);
}

#[tokio::test]
async fn test_source_closed_exactly_once_on_every_path() {
    // End of stream
    let observed = run_text("data: a\n\n").await;
    assert!(observed.result.is_ok());
    assert_eq!(observed.source.close_count(), 1);

    // Read failure
    let observed =
        run_source(MockLineSource::from_lines(["data: a"]).then_fail(io::ErrorKind::Other, "x")).await;
    assert!(observed.result.is_err());
    assert_eq!(observed.source.close_count(), 1);

    // Close failure
    let observed = run_source(
        MockLineSource::from_lines(["data: a"]).with_close_error(io::ErrorKind::Other, "stuck"),
    )
    .await;
    assert!(observed.result.is_ok());
    assert_eq!(observed.source.close_count(), 1);

    // Cancellation mid-stream
    let cancel = Arc::new(AtomicBool::new(false));
    let source = MockLineSource::from_lines(["data: a", "", "data: b", ""])
        .cancel_after_reads(3, Arc::clone(&cancel));
    let handle = source.handle();
    let result = StreamReader::new().run(Arc::clone(&cancel), source, |_| {}).await;
    assert_eq!(result.unwrap(), Termination::Cancelled);
    assert!(cancel.load(Ordering::SeqCst));
    assert_eq!(handle.close_count(), 1);
    assert_eq!(handle.reads_after_close(), 0);
}

#[tokio::test]
async fn test_round_trip_reproduces_sequence() {
    let original = vec![
        SseEvent::new("created", "{\"id\":1}"),
        SseEvent::message("plain"),
        SseEvent::new("patch", "line one\nline two\nline three"),
        SseEvent::new("heartbeat", ""),
        SseEvent::message("a\n\nb"),
        SseEvent::new("done", "bye"),
    ];

    let observed = run_text(&encode_events(&original)).await;

    assert_eq!(observed.result.unwrap(), Termination::EndOfStream);
    assert_eq!(observed.events, original);
}

#[tokio::test]
async fn test_round_trip_generated_sequences() {
    let kinds = ["", "update", "delta", "ping"];
    let payloads = ["", "x", "{\"n\":42}", "multi\nline", "a b  c"];

    for seed in 0..40usize {
        let original: Vec<SseEvent> = (0..(seed % 7) + 1)
            .map(|i| {
                let kind = kinds[(seed + i) % kinds.len()];
                let data = payloads[(seed * 3 + i) % payloads.len()];
                SseEvent::new(kind, data)
            })
            .filter(|event| !event.is_empty())
            .collect();

        let observed = run_text(&encode_events(&original)).await;
        assert_eq!(observed.events, original, "seed {}", seed);
    }
}
