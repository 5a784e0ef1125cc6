//! Reader configuration.
//!
//! Defaults suit a typical HTTP event stream; a few knobs can be overridden
//! from the environment so deployed tools can be tuned without a rebuild.

use std::env;

/// Default upper bound on a single line, terminator excluded.
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Environment variable overriding [`ReaderConfig::max_line_bytes`].
pub const ENV_MAX_LINE_BYTES: &str = "SSE_READER_MAX_LINE_BYTES";

/// Environment variable overriding [`ReaderConfig::flush_on_eof`].
pub const ENV_FLUSH_ON_EOF: &str = "SSE_READER_FLUSH_ON_EOF";

/// Configuration for [`StreamReader`](crate::reader::StreamReader) and the
/// sources it is fed from.
///
/// # Example
///
/// ```
/// use sse_reader::ReaderConfig;
///
/// let config = ReaderConfig::default()
///     .with_max_line_bytes(64 * 1024)
///     .with_flush_on_eof(false);
/// assert!(!config.flush_on_eof);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Dispatch a pending, unterminated block when the stream ends (default: true)
    pub flush_on_eof: bool,
    /// Longest accepted line for byte-backed sources (default: 1 MiB)
    ///
    /// Not read by the reader itself; hand it to the source constructor.
    pub max_line_bytes: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            flush_on_eof: true,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl ReaderConfig {
    /// Create a ReaderConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, overridden by any valid `SSE_READER_*` environment variables.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Apply `SSE_READER_*` environment overrides on top of this config.
    pub fn merge_env(mut self) -> Self {
        if let Ok(raw) = env::var(ENV_MAX_LINE_BYTES) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.max_line_bytes = n,
                _ => tracing::warn!(
                    value = %raw,
                    "ignoring invalid {}",
                    ENV_MAX_LINE_BYTES
                ),
            }
        }
        if let Ok(raw) = env::var(ENV_FLUSH_ON_EOF) {
            match parse_bool(&raw) {
                Some(flag) => self.flush_on_eof = flag,
                None => tracing::warn!(value = %raw, "ignoring invalid {}", ENV_FLUSH_ON_EOF),
            }
        }
        self
    }

    /// Set whether a trailing unterminated block is dispatched at end of stream.
    pub fn with_flush_on_eof(mut self, flush: bool) -> Self {
        self.flush_on_eof = flush;
        self
    }

    /// Set the longest accepted line.
    pub fn with_max_line_bytes(mut self, max: usize) -> Self {
        self.max_line_bytes = max;
        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
