//! Common utility functions shared across the client and the CLI.
//!
//! Pure functions only: no side effects, no I/O.

pub mod bytes;
pub mod string;

pub use string::{push_if_not_empty, StringExt};
