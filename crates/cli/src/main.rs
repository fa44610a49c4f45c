//! action-test - drive a conversational action from the terminal
//!
//! This crate is the *composition root* for the CLI.
//! It parses arguments, picks a transport, and runs the interactive loop.

mod args;
mod interactive;
mod run;
mod terminal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run::run().await
}
