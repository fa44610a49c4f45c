//! Turn fingerprinting for cassette matching.
//!
//! A recorded turn is matched by what the user said and the dialog context
//! it was said in, not by its position in the run. Conversation state tokens
//! are not hashed: they are opaque and differ between sessions.
//!
//! Hashed elements:
//!
//! - **Text query**: full content
//! - **Language code**: the resolved locale
//! - **New conversation flag**: a welcome turn differs from a mid-dialog one

use sha2::{Digest, Sha256};

use actions_test_shared::AssistRequest;

/// Characters of the query kept in the summary.
const SUMMARY_PREFIX_LEN: usize = 40;

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct TurnFingerprint {
    hash: [u8; 32],
    summary: String,
}

impl TurnFingerprint {
    pub fn from_request(request: &AssistRequest) -> Self {
        let dialog = &request.config.dialog_state_in;

        let mut hasher = Sha256::new();
        hasher.update(b"query:");
        hasher.update(request.text_query().as_bytes());
        hasher.update(b"lang:");
        hasher.update(dialog.language_code.as_bytes());
        hasher.update(b"new:");
        hasher.update([u8::from(dialog.is_new_conversation)]);

        let hash: [u8; 32] = hasher.finalize().into();
        let query_prefix: String = request
            .text_query()
            .chars()
            .take(SUMMARY_PREFIX_LEN)
            .collect();
        let summary = format!(
            "{} | new:{} | {query_prefix}",
            dialog.language_code, dialog.is_new_conversation
        );

        Self { hash, summary }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// First 8 hex chars, for logs.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.hash[..4])
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }
}

impl std::fmt::Display for TurnFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.short_hex(), self.summary)
    }
}
