use async_trait::async_trait;
use simwatch_adapters::AdapterError;

use super::Notifier;

/// Prints messages to stdout instead of sending them. Used by `--dry-run`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, text: &str) -> Result<(), AdapterError> {
        println!("---- notification ----\n{}\n----------------------", text);
        Ok(())
    }
}
