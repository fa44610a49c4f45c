//! Client error types.

use std::time::Duration;

use thiserror::Error;

use actions_test_shared::PayloadError;

/// Failure of the underlying stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Failed to open stream: {0}")]
    Open(String),

    #[error("Stream failed: {0}")]
    Stream(String),

    #[error("No recording for '{text_query}' (fingerprint {fingerprint})")]
    NoRecording {
        fingerprint: String,
        text_query: String,
    },

    #[error("Cassette error: {0}")]
    Cassette(String),
}

impl TransportError {
    pub fn open(msg: impl Into<String>) -> Self {
        Self::Open(msg.into())
    }

    pub fn stream(msg: impl Into<String>) -> Self {
        Self::Stream(msg.into())
    }

    pub fn cassette(msg: impl Into<String>) -> Self {
        Self::Cassette(msg.into())
    }
}

/// Why a turn was rejected. The session is untouched in every case.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TurnError {
    #[error("Query text cannot be empty")]
    EmptyQuery,

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed debug payload: {reason}")]
    MalformedDebugPayload { reason: String },

    #[error("Missing content root at {path}")]
    MissingContentRoot { path: &'static str },

    #[error("Turn timed out after {after:?}")]
    Timeout { after: Duration },
}

impl TurnError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDebugPayload {
            reason: reason.into(),
        }
    }
}

impl From<PayloadError> for TurnError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Malformed { reason } => Self::MalformedDebugPayload { reason },
            PayloadError::MissingContentRoot { path } => Self::MissingContentRoot { path },
        }
    }
}
