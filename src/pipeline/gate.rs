//! Manual edit checkpoints.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tracing::debug;

/// A pause that lets an operator edit a side file before the pipeline reloads it.
#[allow(async_fn_in_trait)]
pub trait EditGate {
    /// Block until the operator is done editing `path`.
    async fn wait_for_edits(&mut self, path: &Path) -> Result<()>;
}

/// Waits for Enter on stdin. There is no timeout.
pub struct ConsoleGate {
    stdin: BufReader<Stdin>,
}

impl ConsoleGate {
    pub fn new() -> Self {
        Self { stdin: BufReader::new(tokio::io::stdin()) }
    }
}

impl Default for ConsoleGate {
    fn default() -> Self {
        Self::new()
    }
}

impl EditGate for ConsoleGate {
    async fn wait_for_edits(&mut self, path: &Path) -> Result<()> {
        println!("\n📝 Text saved to '{}'", path.display());
        print!("✏️  Make your edits, then press Enter to continue...");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = self.stdin.read_line(&mut line).await.context("Failed to read from stdin")?;
        if read == 0 {
            // Closed stdin counts as acknowledgment
            println!();
            debug!("stdin closed, continuing");
        }

        Ok(())
    }
}

/// Continues immediately, for unattended runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoGate;

impl EditGate for AutoGate {
    async fn wait_for_edits(&mut self, path: &Path) -> Result<()> {
        debug!("Skipping manual edit of {}", path.display());
        Ok(())
    }
}
