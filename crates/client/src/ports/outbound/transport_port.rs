//! Transport Port - bidirectional assist stream
//!
//! One call per turn. The adapter opens the stream, writes the request and
//! half-closes the write side before returning. The returned stream yields
//! inbound messages and terminates on end-of-stream, or yields an error.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use actions_test_shared::{AssistMessage, AssistRequest};

use crate::error::TransportError;

/// Inbound messages for one turn.
pub type AssistStream = BoxStream<'static, Result<AssistMessage, TransportError>>;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AssistTransport: Send + Sync {
    async fn assist(&self, request: AssistRequest) -> Result<AssistStream, TransportError>;
}
