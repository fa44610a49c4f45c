//! Turn Orchestrator
//!
//! `ConversationClient` owns the session and runs one turn at a time:
//!
//! ```text
//! Idle -> AwaitingStream -> Streaming -> Completed
//!              |                |
//!              +----> Failed <--+
//! ```
//!
//! The session is only updated on `Completed`. A failed turn leaves it
//! exactly as it was, so the next `send` retries from the same state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use uuid::Uuid;

use actions_test_domain::{
    AssistResponse, DeviceIdentity, LatLng, LocaleResolution, LocaleTable, Session,
};
use actions_test_shared::AssistRequest;

use super::normalizer::{NormalizedTurn, ResponseNormalizer};
use super::request_builder::{self, IncludeOptions};
use crate::config::ClientConfig;
use crate::error::TurnError;
use crate::ports::outbound::AssistTransport;

/// Lifecycle of a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingStream,
    Streaming,
    Completed,
    Failed,
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::AwaitingStream => "awaiting_stream",
            Self::Streaming => "streaming",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

struct Turn {
    id: Uuid,
    state: TurnState,
}

impl Turn {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: TurnState::Idle,
        }
    }

    fn transition(&mut self, next: TurnState) {
        tracing::debug!(turn_id = %self.id, from = %self.state, to = %next, "Turn state");
        self.state = next;
    }
}

/// Drives a conversation over an [`AssistTransport`].
pub struct ConversationClient {
    transport: Arc<dyn AssistTransport>,
    locales: LocaleTable,
    session: Session,
    include: IncludeOptions,
    turn_timeout: Option<Duration>,
    last_turn_state: TurnState,
}

impl ConversationClient {
    /// A client on the table's default locale with default device settings.
    pub fn new(transport: Arc<dyn AssistTransport>, locales: LocaleTable) -> Self {
        let session = Session::new(locales.default_locale());
        Self {
            transport,
            locales,
            session,
            include: IncludeOptions::default(),
            turn_timeout: None,
            last_turn_state: TurnState::Idle,
        }
    }

    pub fn from_config(
        transport: Arc<dyn AssistTransport>,
        locales: LocaleTable,
        config: &ClientConfig,
    ) -> Self {
        let mut client = Self::new(transport, locales)
            .with_include(config.include)
            .with_turn_timeout(config.turn_timeout);
        client.set_locale(&config.locale);
        client.session.set_device(config.device.clone());
        client.session.set_location(config.location);
        client
    }

    pub fn with_include(mut self, include: IncludeOptions) -> Self {
        self.include = include;
        self
    }

    /// `None` waits for the stream indefinitely.
    pub fn with_turn_timeout(mut self, turn_timeout: Option<Duration>) -> Self {
        self.turn_timeout = turn_timeout;
        self
    }

    // =========================================================================
    // Turns
    // =========================================================================

    /// Sends one text query and waits for the normalized response.
    ///
    /// # Errors
    ///
    /// Any [`TurnError`]; the session is unchanged when one is returned.
    pub async fn send(&mut self, text: &str) -> Result<AssistResponse, TurnError> {
        let mut turn = Turn::new();
        tracing::info!(turn_id = %turn.id, locale = %self.session.locale(), "> {text}");

        let result = match request_builder::build_request(&self.session, text, self.include) {
            Ok(request) => {
                turn.transition(TurnState::AwaitingStream);
                self.run_with_timeout(request, &mut turn).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(NormalizedTurn {
                response,
                conversation_state,
            }) => {
                self.session.record_turn(conversation_state);
                turn.transition(TurnState::Completed);
                self.last_turn_state = TurnState::Completed;
                tracing::info!(turn_id = %turn.id, mic_open = response.mic_open, "Turn completed");
                Ok(response)
            }
            Err(e) => {
                turn.transition(TurnState::Failed);
                self.last_turn_state = TurnState::Failed;
                tracing::warn!(turn_id = %turn.id, error = %e, "Turn failed");
                Err(e)
            }
        }
    }

    async fn run_with_timeout(
        &self,
        request: AssistRequest,
        turn: &mut Turn,
    ) -> Result<NormalizedTurn, TurnError> {
        let transport = Arc::clone(&self.transport);
        let run = run_turn(transport, request, self.include, turn);
        match self.turn_timeout {
            Some(after) => tokio::time::timeout(after, run)
                .await
                .unwrap_or(Err(TurnError::Timeout { after })),
            None => run.await,
        }
    }

    /// Opens a conversation with the locale's own test app.
    pub async fn start_conversation(
        &mut self,
        prompt: Option<&str>,
    ) -> Result<AssistResponse, TurnError> {
        let app_name = self
            .locales
            .phrases_for(self.session.locale())
            .my_test_app()
            .to_string();
        self.start_conversation_with(&app_name, prompt).await
    }

    /// Opens a conversation with `app_name`, optionally jumping to `prompt`.
    pub async fn start_conversation_with(
        &mut self,
        app_name: &str,
        prompt: Option<&str>,
    ) -> Result<AssistResponse, TurnError> {
        if !self.locales.is_supported(self.session.locale()) {
            tracing::warn!(
                locale = %self.session.locale(),
                "Locale does not have pre-defined strings, using {}",
                self.locales.default_locale()
            );
        }
        let query =
            request_builder::start_conversation_query(&self.locales, &self.session, app_name, prompt);
        self.send(&query).await
    }

    /// Sends the locale's cancel phrase.
    pub async fn end_conversation(&mut self) -> Result<AssistResponse, TurnError> {
        let query = request_builder::cancel_query(&self.locales, &self.session);
        self.send(&query).await
    }

    // =========================================================================
    // Session settings
    // =========================================================================

    /// Resolves `tag` and applies the result. Unsupported tags are used as-is.
    pub fn set_locale(&mut self, tag: &str) -> LocaleResolution {
        let resolution = self.locales.resolve(tag);
        match &resolution {
            LocaleResolution::Supported(_) => {}
            LocaleResolution::Alias { alias, canonical } => {
                tracing::info!(locale = %alias, canonical = %canonical, "Using fallback locale");
            }
            LocaleResolution::Unsupported(tag) => {
                tracing::warn!(locale = %tag, "Unsupported locale '{tag}' in this tool");
            }
        }
        self.session.set_locale(resolution.locale());
        resolution
    }

    pub fn set_location(&mut self, location: LatLng) {
        self.session.set_location(Some(location));
    }

    pub fn clear_location(&mut self) {
        self.session.set_location(None);
    }

    pub fn set_device_config(&mut self, model_id: impl Into<String>, instance_id: impl Into<String>) {
        self.session
            .set_device(DeviceIdentity::new(model_id, instance_id));
    }

    /// The next turn opens a fresh conversation.
    pub fn start_new_conversation(&mut self) {
        self.session.start_new_conversation();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn locales(&self) -> &LocaleTable {
        &self.locales
    }

    pub fn last_turn_state(&self) -> TurnState {
        self.last_turn_state
    }
}

async fn run_turn(
    transport: Arc<dyn AssistTransport>,
    request: AssistRequest,
    include: IncludeOptions,
    turn: &mut Turn,
) -> Result<NormalizedTurn, TurnError> {
    let mut stream = transport.assist(request).await?;
    turn.transition(TurnState::Streaming);

    let mut normalizer = ResponseNormalizer::new(include);
    while let Some(message) = stream.next().await {
        normalizer.ingest(message?)?;
    }
    Ok(normalizer.finish())
}
