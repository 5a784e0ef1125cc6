//! Command-line argument parsing for sse-tail.
//!
//! Flags are few enough that a hand-rolled parser keeps the binary lean.

use crate::config::ReaderConfig;

/// Where to read the stream from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Standard input (no argument or `-`)
    Stdin,
    /// HTTP(S) URL to GET
    Url(String),
}

/// How to print each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<kind>\t<data>` with newlines in data escaped
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// Re-encoded SSE blocks
    Raw,
}

/// Options for tailing a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailOptions {
    pub input: Input,
    pub format: OutputFormat,
    pub config: ReaderConfig,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Tail a stream (default)
    Tail(TailOptions),
}

/// Usage text shown by `--help` and after argument errors.
pub const USAGE: &str = "\
Usage: sse-tail [OPTIONS] [URL|-]

Reads a Server-Sent Events stream from URL (or stdin) and prints each event.

Options:
      --json                  Print events as JSON lines
      --raw                   Print events re-encoded as SSE
      --max-line-bytes <N>    Reject lines longer than N bytes
      --no-flush-on-eof       Drop an unterminated final block
  -V, --version               Print version
  -h, --help                  Print this help

Environment:
  SSE_READER_MAX_LINE_BYTES, SSE_READER_FLUSH_ON_EOF   Defaults for the options above
  RUST_LOG                                             Log filter (e.g. sse_reader=debug)";

/// Parse command-line arguments.
///
/// `base` supplies defaults (typically [`ReaderConfig::from_env`]); flags
/// override it.
///
/// # Examples
///
/// ```
/// use sse_reader::cli::args::{parse_args, CliCommand};
/// use sse_reader::ReaderConfig;
///
/// let args = vec!["sse-tail".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter(), ReaderConfig::default()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I, base: ReaderConfig) -> Result<CliCommand, String>
where
    I: Iterator<Item = String>,
{
    let mut input = Input::Stdin;
    let mut format = OutputFormat::Text;
    let mut config = base;
    let mut positional_seen = false;

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--json" => format = OutputFormat::Json,
            "--raw" => format = OutputFormat::Raw,
            "--no-flush-on-eof" => config.flush_on_eof = false,
            "--max-line-bytes" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--max-line-bytes requires a value".to_string())?;
                config.max_line_bytes = parse_positive(&value)?;
            }
            flag if flag.starts_with("--max-line-bytes=") => {
                config.max_line_bytes = parse_positive(&flag["--max-line-bytes=".len()..])?;
            }
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(format!("unknown option: {}", flag));
            }
            target => {
                if positional_seen {
                    return Err(format!("unexpected argument: {}", target));
                }
                positional_seen = true;
                input = if target == "-" {
                    Input::Stdin
                } else {
                    Input::Url(target.to_string())
                };
            }
        }
    }

    Ok(CliCommand::Tail(TailOptions {
        input,
        format,
        config,
    }))
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("invalid byte count: {}", raw)),
    }
}
