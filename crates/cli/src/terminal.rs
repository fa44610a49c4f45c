//! Line-oriented terminal I/O.

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[async_trait]
pub trait Terminal: Send {
    /// Shows `prompt` and reads one line. `None` at end of input.
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>>;

    fn print(&mut self, line: &str);
}

pub struct StdioTerminal {
    lines: Lines<BufReader<Stdin>>,
}

impl StdioTerminal {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdioTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Terminal for StdioTerminal {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;
        }
        self.lines.next_line().await
    }

    fn print(&mut self, line: &str) {
        println!("{line}");
    }
}
