use async_trait::async_trait;
use simwatch_adapters::telegram::TelegramClient;
use simwatch_adapters::AdapterError;

use super::Notifier;
use crate::config::MonitorConfig;

/// Sends messages to one Telegram chat.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: TelegramClient,
}

impl TelegramNotifier {
    pub fn new(client: TelegramClient) -> Self {
        Self { client }
    }

    /// Build a notifier from the monitor configuration.
    pub fn from_config(config: &MonitorConfig) -> Result<Self, AdapterError> {
        let client = TelegramClient::builder()
            .api_base(&config.telegram_api)
            .token(&config.bot_token)
            .chat_id(&config.chat_id)
            .timeout(config.notify_timeout)
            .build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), AdapterError> {
        self.client.send_message(text).await
    }
}
