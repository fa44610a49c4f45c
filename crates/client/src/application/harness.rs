//! Test lifecycle around a [`ConversationClient`].
//!
//! Each test starts a new conversation, runs its body, reports the outcome
//! and always sends a best-effort cancel afterwards.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use super::conversation::ConversationClient;
use crate::ports::outbound::TestReporter;

/// Result of one [`TestHarness::run_test`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub name: String,
    pub passed: bool,
    pub error: Option<String>,
}

pub struct TestHarness {
    client: ConversationClient,
    reporter: Arc<dyn TestReporter>,
}

impl TestHarness {
    pub fn new(client: ConversationClient, reporter: Arc<dyn TestReporter>) -> Self {
        Self { client, reporter }
    }

    pub fn client(&self) -> &ConversationClient {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut ConversationClient {
        &mut self.client
    }

    pub fn into_client(self) -> ConversationClient {
        self.client
    }

    /// Runs `body` as the test `name`.
    ///
    /// ```ignore
    /// harness
    ///     .run_test("welcome", |client| {
    ///         Box::pin(async move {
    ///             let response = client.start_conversation(None).await?;
    ///             anyhow::ensure!(response.mic_open, "expected an open mic");
    ///             Ok(())
    ///         })
    ///     })
    ///     .await;
    /// ```
    pub async fn run_test<F>(&mut self, name: &str, body: F) -> TestOutcome
    where
        F: for<'a> FnOnce(&'a mut ConversationClient) -> BoxFuture<'a, anyhow::Result<()>>,
    {
        self.reporter.register(name);
        self.client.start_new_conversation();
        tracing::info!(test = %name, "** Starting test {name} **");

        let outcome = match body(&mut self.client).await {
            Ok(()) => {
                self.reporter.pass(name);
                TestOutcome {
                    name: name.to_string(),
                    passed: true,
                    error: None,
                }
            }
            Err(e) => {
                let message = format!("{e:#}");
                tracing::error!(test = %name, error = %message, "Test failed");
                self.reporter.fail(name, &message);
                TestOutcome {
                    name: name.to_string(),
                    passed: false,
                    error: Some(message),
                }
            }
        };

        if let Err(e) = self.client.end_conversation().await {
            tracing::warn!(test = %name, error = %e, "Cancel after test failed");
        }
        tracing::info!(test = %name, "** Test ends **");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::ports::outbound::{MockAssistTransport, MockTestReporter};
    use crate::test_fixtures::{self, debug_message};
    use actions_test_domain::LocaleTable;
    use anyhow::Context;
    use futures_util::{stream, StreamExt};
    use mockall::predicate::*;
    use mockall::Sequence;

    fn transport_answering_everything() -> MockAssistTransport {
        let mut transport = MockAssistTransport::new();
        transport.expect_assist().returning(|request| {
            let payload = if request.text_query() == "cancel" {
                test_fixtures::number_genie_exit()
            } else {
                test_fixtures::number_genie_welcome()
            };
            Ok(stream::iter(vec![Ok(debug_message(&payload))]).boxed())
        });
        transport
    }

    fn harness(transport: MockAssistTransport, reporter: MockTestReporter) -> TestHarness {
        let client = ConversationClient::new(Arc::new(transport), LocaleTable::builtin());
        TestHarness::new(client, Arc::new(reporter))
    }

    #[tokio::test]
    async fn passing_test_is_reported() {
        let mut reporter = MockTestReporter::new();
        let mut seq = Sequence::new();
        reporter
            .expect_register()
            .with(eq("welcome"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        reporter
            .expect_pass()
            .with(eq("welcome"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        reporter.expect_fail().never();

        let mut harness = harness(transport_answering_everything(), reporter);
        let outcome = harness
            .run_test("welcome", |client| {
                Box::pin(async move {
                    let response = client.start_conversation(None).await?;
                    anyhow::ensure!(response.mic_open, "expected an open mic");
                    Ok(())
                })
            })
            .await;

        assert!(outcome.passed);
        assert_eq!(outcome.error, None);
        // The trailing cancel turn ran and closed the conversation.
        assert!(!harness.client().session().is_new_conversation());
    }

    #[tokio::test]
    async fn failing_test_is_reported_with_context() {
        let mut reporter = MockTestReporter::new();
        reporter.expect_register().return_const(());
        reporter.expect_pass().never();
        reporter
            .expect_fail()
            .withf(|name, error| name == "guess" && error.contains("checking the guess"))
            .times(1)
            .return_const(());

        let mut harness = harness(transport_answering_everything(), reporter);
        let outcome = harness
            .run_test("guess", |client| {
                Box::pin(async move {
                    let check = async {
                        let response = client.send("50").await?;
                        anyhow::ensure!(!response.mic_open, "mic still open");
                        Ok::<(), anyhow::Error>(())
                    };
                    check.await.context("checking the guess")
                })
            })
            .await;

        assert!(!outcome.passed);
        assert!(outcome.error.expect("error").contains("mic still open"));
    }

    #[tokio::test]
    async fn failed_cancel_does_not_change_outcome() {
        let mut transport = MockAssistTransport::new();
        transport
            .expect_assist()
            .returning(|_| Err(TransportError::open("offline")));
        let mut reporter = MockTestReporter::new();
        reporter.expect_register().return_const(());
        reporter.expect_pass().times(1).return_const(());

        let mut harness = harness(transport, reporter);
        let outcome = harness
            .run_test("noop", |_client| Box::pin(async { Ok(()) }))
            .await;
        assert!(outcome.passed);
    }

    #[tokio::test]
    async fn each_test_starts_a_new_conversation() {
        let mut transport = MockAssistTransport::new();
        transport
            .expect_assist()
            .withf(|request| request.text_query() != "cancel")
            .times(2)
            .returning(|request| {
                assert!(request.config.dialog_state_in.is_new_conversation);
                Ok(stream::iter(vec![Ok(debug_message(
                    &test_fixtures::number_genie_welcome(),
                ))])
                .boxed())
            });
        transport.expect_assist().returning(|_| {
            Ok(stream::iter(vec![Ok(debug_message(&test_fixtures::number_genie_exit()))]).boxed())
        });
        let mut reporter = MockTestReporter::new();
        reporter.expect_register().return_const(());
        reporter.expect_pass().times(2).return_const(());

        let mut harness = harness(transport, reporter);
        for name in ["first", "second"] {
            let outcome = harness
                .run_test(name, |client| {
                    Box::pin(async move {
                        client.start_conversation(None).await?;
                        Ok(())
                    })
                })
                .await;
            assert!(outcome.passed);
        }
    }
}
