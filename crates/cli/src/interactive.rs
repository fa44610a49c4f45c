//! Interactive read-eval loop around a [`ConversationClient`].

use std::future::Future;

use thiserror::Error;

use actions_test_client::{ConversationClient, TurnError};
use actions_test_domain::AssistResponse;

use crate::terminal::Terminal;

const USER_PROMPT: &str = "> ";

/// Why a conversation stopped before the action closed it.
#[derive(Debug, Error)]
pub enum AbortReason {
    #[error("SIGINT")]
    Interrupted,

    #[error("end of input")]
    EndOfInput,

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("cannot render response: {0}")]
    Render(#[from] serde_json::Error),
}

pub struct Interactive<T> {
    client: ConversationClient,
    terminal: T,
}

impl<T: Terminal> Interactive<T> {
    pub fn new(client: ConversationClient, terminal: T) -> Self {
        Self { client, terminal }
    }

    #[cfg(test)]
    pub fn client(&self) -> &ConversationClient {
        &self.client
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Runs one conversation to completion or abort.
    ///
    /// On abort a cancel turn is still attempted and the reason printed.
    /// Resolving `interrupt` aborts whatever turn or read is in flight.
    pub async fn run(
        &mut self,
        action: Option<&str>,
        prompt: Option<&str>,
        interrupt: impl Future<Output = ()>,
    ) -> Result<(), AbortReason> {
        let result = tokio::select! {
            biased;
            () = interrupt => Err(AbortReason::Interrupted),
            result = self.converse(action, prompt) => result,
        };

        if let Err(reason) = &result {
            tracing::info!(reason = %reason, "Aborting conversation");
            if let Err(e) = self.client.end_conversation().await {
                tracing::debug!(error = %e, "Cancel after abort failed");
            }
            self.terminal.print("");
            self.terminal.print(&format!("Conversation aborted: {reason}"));
        }
        result
    }

    async fn converse(
        &mut self,
        action: Option<&str>,
        prompt: Option<&str>,
    ) -> Result<(), AbortReason> {
        let mut response = match action {
            Some(action) => self.client.start_conversation_with(action, prompt).await?,
            None => self.client.start_conversation(prompt).await?,
        };

        loop {
            self.show(&response)?;
            if !response.mic_open {
                self.client.end_conversation().await?;
                self.terminal.print("End conversation.");
                return Ok(());
            }
            let phrase = self.hear().await?;
            response = self.client.send(&phrase).await?;
        }
    }

    fn show(&mut self, response: &AssistResponse) -> Result<(), AbortReason> {
        let rendered = serde_json::to_string_pretty(response)?;
        self.terminal.print("");
        self.terminal.print("Action response:");
        self.terminal.print(&rendered);
        self.terminal.print("");
        Ok(())
    }

    async fn hear(&mut self) -> Result<String, AbortReason> {
        loop {
            match self.terminal.read_line(USER_PROMPT).await? {
                None => return Err(AbortReason::EndOfInput),
                Some(line) if line.trim().is_empty() => {
                    self.terminal.print("Please enter a user phrase.");
                }
                Some(line) => return Ok(line),
            }
        }
    }
}
