//! Infrastructure: concrete adapters for the outbound ports.

pub mod cassette;
pub mod reporter;

pub use cassette::{Cassette, CassetteTransport, RecordedTurn, TurnFingerprint, CASSETTE_VERSION};
pub use reporter::{ReportSummary, TracingReporter};
