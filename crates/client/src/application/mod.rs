//! Application layer: request building, normalization and turn orchestration.

pub mod conversation;
pub mod harness;
pub mod normalizer;
pub mod request_builder;

pub use conversation::{ConversationClient, TurnState};
pub use harness::{TestHarness, TestOutcome};
pub use normalizer::{NormalizedTurn, ResponseNormalizer};
pub use request_builder::IncludeOptions;
