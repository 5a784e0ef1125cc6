//! CLI module for sse-tail.
//!
//! This module provides the command-line front end over the library:
//! - Argument parsing
//! - Version display
//! - Ctrl+C handling
//! - Tailing a stream from a URL or stdin
//!
//! # Usage
//!
//! ```ignore
//! use sse_reader::cli::{parse_args, CliCommand};
//! use sse_reader::ReaderConfig;
//!
//! match parse_args(std::env::args(), ReaderConfig::from_env())? {
//!     CliCommand::Tail(opts) => run_tail(opts, cancel).await?,
//!     _ => {}
//! }
//! ```

pub mod args;
pub mod interrupt;
pub mod output;
pub mod tail;

pub use args::{parse_args, CliCommand, Input, OutputFormat, TailOptions, USAGE};
pub use interrupt::setup_interrupt_handler;
pub use output::format_event;
pub use tail::{open_source, run_tail, tail_to};

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
