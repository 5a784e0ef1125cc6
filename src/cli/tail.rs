//! The tail command: open a source, read it, print every event.

use color_eyre::eyre::{eyre, Result, WrapErr};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::adapters::{ByteStreamSource, ResponseSource};
use crate::cli::args::{Input, TailOptions};
use crate::cli::output::format_event;
use crate::reader::{RunStats, StreamReader};
use crate::traits::LineSource;

/// Open the configured input as a line source.
pub async fn open_source(opts: &TailOptions) -> Result<Box<dyn LineSource>> {
    let max_line_bytes = opts.config.max_line_bytes;
    match &opts.input {
        Input::Stdin => {
            tracing::debug!("reading SSE stream from stdin");
            let source = ByteStreamSource::with_max_line_bytes(
                tokio_util::io::ReaderStream::new(tokio::io::stdin()),
                max_line_bytes,
            );
            Ok(Box::new(source))
        }
        Input::Url(url) => {
            let response = reqwest::Client::new()
                .get(url)
                .header(reqwest::header::ACCEPT, "text/event-stream")
                .send()
                .await
                .wrap_err_with(|| format!("failed to connect to {}", url))?;

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(eyre!("server returned {}: {}", status, body));
            }

            tracing::info!(%url, %status, "connected to SSE stream");
            Ok(Box::new(ResponseSource::from_response_with_limit(
                response,
                max_line_bytes,
            )))
        }
    }
}

/// Read `source` and write each event to `out` until the stream ends,
/// `cancel` is raised, or writing fails.
///
/// A failed write (e.g. a closed pipe) raises `cancel` so reading stops at
/// the next line, and is then reported as the error.
pub async fn tail_to<S, W>(
    opts: &TailOptions,
    source: S,
    cancel: Arc<AtomicBool>,
    out: &mut W,
) -> Result<RunStats>
where
    S: LineSource,
    W: Write,
{
    let reader = StreamReader::with_config(opts.config.clone());
    let format = opts.format;
    let mut write_error = None;

    let stats = reader
        .run_with_stats(Arc::clone(&cancel), source, |event| {
            if write_error.is_some() {
                return;
            }
            let rendered = format_event(&event, format);
            if let Err(e) = out.write_all(rendered.as_bytes()).and_then(|_| out.flush()) {
                cancel.store(true, Ordering::SeqCst);
                write_error = Some(e);
            }
        })
        .await
        .wrap_err("SSE stream ended with an error")?;

    if let Some(e) = write_error {
        return Err(e).wrap_err("failed to write event");
    }
    Ok(stats)
}

/// Run the tail command against stdout.
pub async fn run_tail(opts: TailOptions, cancel: Arc<AtomicBool>) -> Result<RunStats> {
    let source = open_source(&opts).await?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    tail_to(&opts, source, cancel, &mut out).await
}
