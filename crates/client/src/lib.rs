//! Client for driving a conversational action turn by turn.
//!
//! The [`ConversationClient`] sends text queries over an [`AssistTransport`],
//! normalizes the streamed replies into [`AssistResponse`] records, and
//! threads the continuation token through the [`Session`]. [`TestHarness`]
//! wraps a client with test lifecycle reporting.
//!
//! [`AssistResponse`]: actions_test_domain::AssistResponse
//! [`Session`]: actions_test_domain::Session

pub mod application;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod ports;

#[cfg(test)]
mod test_fixtures;

pub use application::{
    ConversationClient, IncludeOptions, NormalizedTurn, ResponseNormalizer, TestHarness,
    TestOutcome, TurnState,
};
pub use config::ClientConfig;
pub use error::{TransportError, TurnError};
pub use infrastructure::{Cassette, CassetteTransport, ReportSummary, TracingReporter};
pub use ports::outbound::{AssistStream, AssistTransport, TestReporter};

#[cfg(any(test, feature = "testing"))]
pub use ports::outbound::{MockAssistTransport, MockTestReporter};
