//! Mock implementations for testing.
//!
//! Test doubles for the trait abstractions, enabling unit testing without
//! network dependencies.
//!
//! # Available Mocks
//!
//! - [`MockLineSource`] - scripted lines and failures with usage counters

pub mod source;

pub use source::{MockLineSource, MockRead, MockSourceHandle};
