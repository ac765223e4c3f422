//! Notification delivery.
//!
//! A [`Notifier`] delivers one formatted text to a fixed destination.
//! Delivery is best-effort: [`deliver`] logs a failure and returns, so a
//! broken transport never stops state from being persisted.

mod console;
pub mod message;
mod telegram;

pub use console::ConsoleNotifier;
pub use telegram::TelegramNotifier;

use std::fmt::Debug;

use async_trait::async_trait;
use simwatch_adapters::AdapterError;
use tracing::{info, warn};

/// Trait for pushing a message to the operator.
#[async_trait]
pub trait Notifier: Send + Sync + Debug {
    /// Send `text` (HTML subset: `<b>`, `<code>`).
    async fn notify(&self, text: &str) -> Result<(), AdapterError>;
}

/// Send a message, logging instead of propagating any failure.
///
/// Returns whether the message was delivered.
pub async fn deliver(notifier: &dyn Notifier, text: &str) -> bool {
    match notifier.notify(text).await {
        Ok(()) => {
            info!(chars = text.chars().count(), "Notification sent");
            true
        }
        Err(e) => {
            warn!(error = %e, "Failed to send notification");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Broken;

    #[async_trait]
    impl Notifier for Broken {
        async fn notify(&self, _text: &str) -> Result<(), AdapterError> {
            Err(AdapterError::Timeout)
        }
    }

    #[tokio::test]
    async fn test_deliver_swallows_failure() {
        assert!(!deliver(&Broken, "hello").await);
    }

    #[tokio::test]
    async fn test_deliver_reports_success() {
        assert!(deliver(&ConsoleNotifier, "hello").await);
    }
}
