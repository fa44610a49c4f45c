//! Outbound ports - Interfaces for external services
//!
//! The streaming transport and the test runner are the only collaborators
//! the client talks to. Everything else is concrete.

pub mod reporter_port;
pub mod transport_port;

pub use reporter_port::TestReporter;
pub use transport_port::{AssistStream, AssistTransport};

#[cfg(any(test, feature = "testing"))]
pub use reporter_port::MockTestReporter;
#[cfg(any(test, feature = "testing"))]
pub use transport_port::MockAssistTransport;
