//! Debug payload decode errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Not JSON, or JSON that does not fit a matched variant.
    #[error("Malformed debug payload: {reason}")]
    Malformed { reason: String },

    /// The rich content structure is absent where one is required.
    #[error("Missing content root at {path}")]
    MissingContentRoot { path: &'static str },
}

impl PayloadError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    pub fn missing_content_root(path: &'static str) -> Self {
        Self::MissingContentRoot { path }
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}
