use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use actions_test_domain::DEFAULT_LOCALE;

#[derive(Debug, Parser)]
#[command(
    name = "action-test",
    version,
    about = "Talk to a conversational action from the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start an interactive conversation
    #[command(after_help = "Example: action-test interactive -c ./credentials.json \"my test app\"")]
    Interactive(InteractiveArgs),
}

#[derive(Debug, Args)]
pub struct InteractiveArgs {
    /// Action to talk to (defaults to the locale's test app)
    pub action: Option<String>,

    /// Phrase to open the conversation with
    pub prompt: Option<String>,

    /// Your credential file path
    #[arg(
        short,
        long,
        env = "ACTION_TEST_CREDENTIAL",
        default_value = "./credentials.json"
    )]
    pub credential: PathBuf,

    /// Locale string
    #[arg(short, long, env = "ACTION_TEST_LOCALE", default_value = DEFAULT_LOCALE)]
    pub locale: String,

    /// Replay turns from this cassette file
    #[arg(long, env = "ACTION_TEST_CASSETTE")]
    pub cassette: Option<PathBuf>,
}
