//! Cassette transport: record turns from a live transport, replay them later.
//!
//! Recordings are indexed by [`TurnFingerprint`] and replayed FIFO per
//! fingerprint, so a test that repeats the same query gets the replies in
//! the order they were recorded.
//!
//! ```ignore
//! // Record against a live transport, then persist.
//! let cassette = CassetteTransport::recording(live, "cassettes/number_genie.json".into());
//! // ... run the tests ...
//! cassette.save()?;
//!
//! // Later: deterministic playback without a network.
//! let cassette = CassetteTransport::playback("cassettes/number_genie.json".into())?;
//! ```

mod fingerprint;

pub use fingerprint::TurnFingerprint;

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures_util::{stream, StreamExt};
use serde::{Deserialize, Serialize};

use actions_test_shared::{AssistMessage, AssistRequest};

use crate::error::TransportError;
use crate::ports::outbound::{AssistStream, AssistTransport};

/// Current cassette format version.
pub const CASSETTE_VERSION: &str = "1.0";

/// One recorded turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedTurn {
    pub text_query: String,
    pub language_code: String,
    pub messages: Vec<AssistMessage>,
    /// Set when the live stream failed after `messages`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Cassette file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cassette {
    version: String,
    recorded_at: String,
    /// Turns indexed by fingerprint hex.
    turns: HashMap<String, Vec<RecordedTurn>>,
}

impl Default for Cassette {
    fn default() -> Self {
        Self::new()
    }
}

impl Cassette {
    pub fn new() -> Self {
        Self {
            version: CASSETTE_VERSION.to_string(),
            recorded_at: chrono::Utc::now().to_rfc3339(),
            turns: HashMap::new(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn recorded_at(&self) -> &str {
        &self.recorded_at
    }

    pub fn add_turn(&mut self, fingerprint: String, turn: RecordedTurn) {
        self.turns.entry(fingerprint).or_default().push(turn);
    }

    /// Removes and returns the oldest turn recorded under `fingerprint`.
    pub fn take_turn(&mut self, fingerprint: &str) -> Option<RecordedTurn> {
        self.turns.get_mut(fingerprint).and_then(|v| {
            if v.is_empty() {
                None
            } else {
                Some(v.remove(0))
            }
        })
    }

    pub fn fingerprint_count(&self) -> usize {
        self.turns.len()
    }

    pub fn turn_count(&self) -> usize {
        self.turns.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.turn_count() == 0
    }
}

enum CassetteMode {
    Record(Arc<dyn AssistTransport>),
    Playback,
}

/// [`AssistTransport`] backed by a cassette file.
pub struct CassetteTransport {
    mode: CassetteMode,
    path: Option<PathBuf>,
    cassette: Mutex<Cassette>,
}

impl CassetteTransport {
    /// Forwards every turn to `inner` and records it. Call
    /// [`save`](Self::save) to write the cassette to `path`.
    pub fn recording(inner: Arc<dyn AssistTransport>, path: PathBuf) -> Self {
        Self {
            mode: CassetteMode::Record(inner),
            path: Some(path),
            cassette: Mutex::new(Cassette::new()),
        }
    }

    /// Replays turns from the cassette at `path`.
    ///
    /// # Errors
    ///
    /// `TransportError::Cassette` if the file cannot be read or parsed, or
    /// was written by another cassette version.
    pub fn playback(path: PathBuf) -> Result<Self, TransportError> {
        let content = fs::read_to_string(&path).map_err(|e| {
            TransportError::cassette(format!("Failed to read {}: {e}", path.display()))
        })?;
        let cassette: Cassette = serde_json::from_str(&content).map_err(|e| {
            TransportError::cassette(format!("Failed to parse {}: {e}", path.display()))
        })?;

        if cassette.version() != CASSETTE_VERSION {
            return Err(TransportError::cassette(format!(
                "Unsupported cassette version: {} (expected {CASSETTE_VERSION})",
                cassette.version()
            )));
        }

        tracing::info!(
            cassette = ?path,
            fingerprints = cassette.fingerprint_count(),
            turns = cassette.turn_count(),
            "Loaded cassette"
        );

        Ok(Self {
            mode: CassetteMode::Playback,
            path: Some(path),
            cassette: Mutex::new(cassette),
        })
    }

    /// Replays an in-memory cassette.
    pub fn from_cassette(cassette: Cassette) -> Self {
        Self {
            mode: CassetteMode::Playback,
            path: None,
            cassette: Mutex::new(cassette),
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.mode, CassetteMode::Record(_))
    }

    /// Turns still available (playback) or captured so far (record).
    pub fn turn_count(&self) -> usize {
        self.lock().turn_count()
    }

    /// Snapshot of the current cassette contents.
    pub fn cassette(&self) -> Cassette {
        self.lock().clone()
    }

    /// Writes the recorded cassette as pretty JSON. No-op in playback mode.
    ///
    /// # Errors
    ///
    /// `TransportError::Cassette` on serialization or file I/O failure.
    pub fn save(&self) -> Result<(), TransportError> {
        let (CassetteMode::Record(_), Some(path)) = (&self.mode, &self.path) else {
            return Ok(());
        };

        let cassette = self.lock();
        if cassette.is_empty() {
            tracing::warn!(cassette = ?path, "No recorded turns to save");
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TransportError::cassette(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(&*cassette)
            .map_err(|e| TransportError::cassette(e.to_string()))?;
        fs::write(path, json).map_err(|e| {
            TransportError::cassette(format!("Failed to write {}: {e}", path.display()))
        })?;

        tracing::info!(
            cassette = ?path,
            fingerprints = cassette.fingerprint_count(),
            turns = cassette.turn_count(),
            "Saved cassette"
        );
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Cassette> {
        self.cassette.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn record(
        &self,
        inner: &Arc<dyn AssistTransport>,
        request: AssistRequest,
    ) -> Result<AssistStream, TransportError> {
        let fingerprint = TurnFingerprint::from_request(&request);
        let text_query = request.text_query().to_string();
        let language_code = request.language_code().to_string();

        let mut live = inner.assist(request).await?;
        let mut messages = Vec::new();
        let mut error = None;
        while let Some(next) = live.next().await {
            match next {
                Ok(message) => messages.push(message),
                Err(TransportError::Stream(reason)) => {
                    error = Some(reason);
                    break;
                }
                Err(e) => {
                    error = Some(e.to_string());
                    break;
                }
            }
        }

        tracing::debug!(
            fingerprint = %fingerprint,
            messages = messages.len(),
            failed = error.is_some(),
            "Recorded turn"
        );

        let turn = RecordedTurn {
            text_query,
            language_code,
            messages,
            error,
        };
        let replay = replay(turn.clone());
        self.lock().add_turn(fingerprint.to_hex(), turn);
        Ok(replay)
    }

    fn play(&self, request: &AssistRequest) -> Result<AssistStream, TransportError> {
        let fingerprint = TurnFingerprint::from_request(request);

        let Some(turn) = self.lock().take_turn(&fingerprint.to_hex()) else {
            tracing::warn!(fingerprint = %fingerprint, "No matching recording for turn");
            return Err(TransportError::NoRecording {
                fingerprint: fingerprint.short_hex(),
                text_query: request.text_query().to_string(),
            });
        };

        tracing::debug!(fingerprint = %fingerprint, "Matched recording");
        Ok(replay(turn))
    }
}

fn replay(turn: RecordedTurn) -> AssistStream {
    let tail = turn.error.map(|e| Err(TransportError::Stream(e)));
    stream::iter(turn.messages.into_iter().map(Ok).chain(tail)).boxed()
}

#[async_trait]
impl AssistTransport for CassetteTransport {
    async fn assist(&self, request: AssistRequest) -> Result<AssistStream, TransportError> {
        match &self.mode {
            CassetteMode::Record(inner) => self.record(inner, request).await,
            CassetteMode::Playback => self.play(&request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ConversationClient;
    use crate::error::TurnError;
    use crate::ports::outbound::MockAssistTransport;
    use crate::test_fixtures::{self, debug_message};
    use actions_test_domain::LocaleTable;

    fn live_transport() -> MockAssistTransport {
        let mut transport = MockAssistTransport::new();
        transport.expect_assist().returning(|request| {
            let messages = match request.text_query() {
                "cancel" => vec![Ok(debug_message(&test_fixtures::number_genie_exit()))],
                "broken" => vec![
                    Ok(AssistMessage::dialog_state(Some(vec![7]), None)),
                    Err(TransportError::stream("connection reset")),
                ],
                _ => vec![
                    Ok(AssistMessage::dialog_state(Some(vec![1, 2]), None)),
                    Ok(debug_message(&test_fixtures::number_genie_welcome())),
                ],
            };
            Ok(stream::iter(messages).boxed())
        });
        transport
    }

    #[tokio::test]
    async fn records_then_replays_a_conversation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("genie.json");

        let recorder = Arc::new(CassetteTransport::recording(
            Arc::new(live_transport()),
            path.clone(),
        ));
        let mut client = ConversationClient::new(recorder.clone(), LocaleTable::builtin());
        let welcome = client.start_conversation(None).await.expect("welcome");
        let exit = client.end_conversation().await.expect("exit");
        assert_eq!(recorder.turn_count(), 2);
        recorder.save().expect("save");

        let player = CassetteTransport::playback(path).expect("playback");
        assert!(!player.is_recording());
        let mut client = ConversationClient::new(Arc::new(player), LocaleTable::builtin());
        assert_eq!(client.start_conversation(None).await.expect("welcome"), welcome);
        assert_eq!(client.end_conversation().await.expect("exit"), exit);
        assert_eq!(client.session().conversation_state(), Some(&[1u8, 2][..]));
    }

    #[tokio::test]
    async fn repeated_queries_replay_in_order() {
        let mut cassette = Cassette::new();
        let session = actions_test_domain::Session::default();
        let request = crate::application::request_builder::build_request(
            &session,
            "hello",
            Default::default(),
        )
        .expect("request");
        let fp = TurnFingerprint::from_request(&request).to_hex();
        for marker in ["first", "second"] {
            cassette.add_turn(
                fp.clone(),
                RecordedTurn {
                    text_query: "hello".into(),
                    language_code: "en-US".into(),
                    messages: vec![AssistMessage::device_action(marker)],
                    error: None,
                },
            );
        }

        let transport = CassetteTransport::from_cassette(cassette);
        for marker in ["first", "second"] {
            let mut replay = transport.assist(request.clone()).await.expect("replay");
            let message = replay.next().await.expect("message").expect("ok");
            assert_eq!(message, AssistMessage::device_action(marker));
            assert!(replay.next().await.is_none());
        }
        assert!(matches!(
            transport.assist(request).await,
            Err(TransportError::NoRecording { text_query, .. }) if text_query == "hello"
        ));
    }

    #[tokio::test]
    async fn recorded_stream_error_is_replayed_after_messages() {
        let recorder = Arc::new(CassetteTransport::recording(
            Arc::new(live_transport()),
            PathBuf::from("unused.json"),
        ));
        let mut client = ConversationClient::new(recorder.clone(), LocaleTable::builtin());
        let live = client.send("broken").await;
        assert!(matches!(live, Err(TurnError::Transport(TransportError::Stream(_)))));

        let player = CassetteTransport::from_cassette(recorder.cassette());
        let mut client = ConversationClient::new(Arc::new(player), LocaleTable::builtin());
        let replayed = client.send("broken").await;
        assert_eq!(replayed, live);
        assert_eq!(
            replayed,
            Err(TurnError::Transport(TransportError::stream("connection reset")))
        );
        assert!(client.session().is_new_conversation());
    }

    #[tokio::test]
    async fn miss_fails_the_turn_without_touching_the_session() {
        let mut client = ConversationClient::new(
            Arc::new(CassetteTransport::from_cassette(Cassette::new())),
            LocaleTable::builtin(),
        );
        let result = client.send("unrecorded").await;
        assert!(matches!(
            result,
            Err(TurnError::Transport(TransportError::NoRecording { .. }))
        ));
        assert!(client.session().is_new_conversation());
    }

    #[test]
    fn playback_rejects_other_versions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("old.json");
        fs::write(
            &path,
            r#"{"version":"0.1","recorded_at":"2024-01-01T00:00:00Z","turns":{}}"#,
        )
        .expect("write");

        let Err(TransportError::Cassette(reason)) = CassetteTransport::playback(path) else {
            panic!("expected a cassette error");
        };
        assert!(reason.contains("Unsupported cassette version: 0.1"));
    }

    #[test]
    fn playback_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            CassetteTransport::playback(dir.path().join("absent.json")),
            Err(TransportError::Cassette(_))
        ));
    }

    #[test]
    fn saving_an_empty_recording_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.json");
        let recorder =
            CassetteTransport::recording(Arc::new(MockAssistTransport::new()), path.clone());
        recorder.save().expect("save");
        assert!(!path.exists());
    }
}
