use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use actions_test_client::{AssistTransport, CassetteTransport, ClientConfig, ConversationClient};
use actions_test_domain::LocaleTable;

use crate::args::{Cli, Commands, InteractiveArgs};
use crate::interactive::Interactive;
use crate::terminal::{StdioTerminal, Terminal};

pub async fn run() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never mix with the conversation on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "actions_test_cli=info,actions_test_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Interactive(args)) => interactive(args).await,
        None => {
            Cli::command().print_help().context("printing help")?;
            println!();
            Ok(())
        }
    }
}

async fn interactive(args: InteractiveArgs) -> Result<()> {
    let mut terminal = StdioTerminal::new();
    tracing::debug!(credential = ?args.credential, "Credential path");

    let transport = match connect(args.cassette.as_deref()) {
        Ok(transport) => transport,
        Err(e) => {
            terminal.print("");
            terminal.print(&format!("Conversation aborted: {e:#}"));
            return Ok(());
        }
    };

    let config = ClientConfig {
        locale: args.locale,
        ..ClientConfig::from_env()
    };
    let client = ConversationClient::from_config(transport, LocaleTable::builtin(), &config);

    let mut session = Interactive::new(client, terminal);
    let outcome = session
        .run(args.action.as_deref(), args.prompt.as_deref(), interrupted())
        .await;
    if let Err(reason) = outcome {
        tracing::debug!(reason = %reason, "Conversation ended early");
    }
    Ok(())
}

/// Picks the transport for this run.
fn connect(cassette: Option<&Path>) -> Result<Arc<dyn AssistTransport>> {
    let Some(path) = cassette else {
        anyhow::bail!("No transport configured: pass --cassette PATH to replay a recording");
    };
    let transport = CassetteTransport::playback(path.to_path_buf())
        .with_context(|| format!("opening cassette {}", path.display()))?;
    Ok(Arc::new(transport))
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
