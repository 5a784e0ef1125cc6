//! Trait abstractions for the reader's collaborators.
//!
//! # Traits
//!
//! - [`LineSource`] - sequential line reads with distinct end of stream
//! - [`CancelSignal`] - non-blocking cancellation query

pub mod cancel;
pub mod source;

pub use cancel::{CancelSignal, NeverCancel};
pub use source::LineSource;
