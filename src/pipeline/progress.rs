//! Console spinner shown while audio is generated.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Spinner frame interval.
const TICK_INTERVAL: Duration = Duration::from_millis(200);

const FRAMES: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";

/// Background spinner task.
///
/// It only draws to the terminal; the cancellation token is the only thing it
/// shares with the caller. Call [`Spinner::stop`] to cancel it and wait for the
/// line to be cleared. Dropping it cancels without waiting.
pub struct Spinner {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start spinning next to `message`. Must be called inside a tokio runtime.
    pub fn start(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner().template("{msg} {spinner}").map(|s| s.tick_chars(FRAMES)).unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.into());

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK_INTERVAL);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => bar.tick(),
                }
            }
            bar.finish_and_clear();
        });

        Self { token, handle: Some(handle) }
    }

    /// Cancel the spinner and wait for its task to finish.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
        {
            debug!("Spinner task ended abnormally: {}", e);
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_joins_task() {
        let spinner = Spinner::start("Working");
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(spinner.handle.as_ref().is_some_and(|h| !h.is_finished()));

        tokio::time::timeout(Duration::from_secs(2), spinner.stop()).await.expect("spinner did not stop");
    }

    #[tokio::test]
    async fn test_drop_cancels_task() {
        let spinner = Spinner::start("Working");
        let token = spinner.token.clone();
        drop(spinner);
        assert!(token.is_cancelled());
    }
}
