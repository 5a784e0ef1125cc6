//! Integration tests reading SSE captures from disk.

use futures_util::StreamExt;
use sse_reader::adapters::ByteStreamSource;
use sse_reader::traits::NeverCancel;
use sse_reader::{ReaderConfig, SseEvent, StreamReader, Termination};
use std::io::Write;
use tempfile::NamedTempFile;

fn capture(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_reads_capture_file() {
    let file = capture(b"event: a\ndata: 1\n\n: keepalive\n\nevent: b\ndata: 2\ndata: 3\n\n");
    let reader = tokio::fs::File::open(file.path()).await.unwrap();

    let mut received = Vec::new();
    let stats = StreamReader::new()
        .run_with_stats(NeverCancel, ByteStreamSource::from_reader(reader), |event| {
            received.push(event)
        })
        .await
        .unwrap();

    assert_eq!(stats.termination, Termination::EndOfStream);
    assert_eq!(stats.lines_read, 9);
    assert_eq!(
        received,
        vec![SseEvent::new("a", "1"), SseEvent::new("b", "2\n3")]
    );
}

#[tokio::test]
async fn test_lazy_events_from_capture_file() {
    let file = capture(b"data: x\r\n\r\ndata: y\r\n\r\nevent: end");
    let reader = tokio::fs::File::open(file.path()).await.unwrap();

    let events: Vec<SseEvent> = StreamReader::new()
        .events(NeverCancel, ByteStreamSource::from_reader(reader))
        .map(|item| item.unwrap())
        .collect()
        .await;

    assert_eq!(
        events,
        vec![
            SseEvent::message("x"),
            SseEvent::message("y"),
            SseEvent::new("end", ""),
        ]
    );
}

#[tokio::test]
async fn test_capture_with_dangling_block_and_flush_disabled() {
    let file = capture(b"data: kept\n\ndata: dropped");
    let reader = tokio::fs::File::open(file.path()).await.unwrap();

    let mut received = Vec::new();
    StreamReader::with_config(ReaderConfig::default().with_flush_on_eof(false))
        .run(NeverCancel, ByteStreamSource::from_reader(reader), |event| {
            received.push(event)
        })
        .await
        .unwrap();

    assert_eq!(received, vec![SseEvent::message("kept")]);
}
