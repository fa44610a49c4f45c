//! Entities - objects with identity that change over time

mod session;

pub use session::Session;
