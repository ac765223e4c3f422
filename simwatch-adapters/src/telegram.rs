//! Telegram Bot API client.
//!
//! Sends a text message to a single chat using `parse_mode=HTML`, so callers
//! may use the `<b>`, `<i>` and `<code>` subset. Interpolated values must be
//! escaped with [`escape_html`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use simwatch_adapters::telegram::TelegramClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TelegramClient::builder()
//!         .token("123456:ABC")
//!         .chat_id("-1001234567890")
//!         .build()?;
//!
//!     client.send_message("<b>hello</b>").await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::AdapterError;

/// Default Bot API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client bound to one bot token and one destination chat.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    api_base: String,
    token: String,
    chat_id: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_base", &self.api_base)
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> TelegramClientBuilder {
        TelegramClientBuilder::default()
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.token
        )
    }

    /// Send an HTML-formatted message to the configured chat.
    pub async fn send_message(&self, text: &str) -> Result<(), AdapterError> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AdapterError::Auth("Bot token rejected".to_string()));
        }

        let payload = response.text().await?;
        match serde_json::from_str::<ApiResponse>(&payload) {
            Ok(api) if api.ok && status.is_success() => Ok(()),
            Ok(api) => Err(AdapterError::Api(
                api.description
                    .unwrap_or_else(|| format!("status {}", status)),
            )),
            Err(_) if !status.is_success() => Err(AdapterError::Http(format!(
                "Bot API returned status {}",
                status
            ))),
            Err(e) => Err(AdapterError::Parse(e.to_string())),
        }
    }
}

/// Builder for TelegramClient.
#[derive(Debug, Default)]
pub struct TelegramClientBuilder {
    api_base: Option<String>,
    token: Option<String>,
    chat_id: Option<String>,
    timeout: Option<Duration>,
}

impl TelegramClientBuilder {
    /// Override the API base URL (default: "https://api.telegram.org").
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the bot token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the destination chat.
    pub fn chat_id(mut self, chat_id: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<TelegramClient, AdapterError> {
        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(TelegramClient {
            client,
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            token: self.token.unwrap_or_default(),
            chat_id: self.chat_id.unwrap_or_default(),
        })
    }
}

/// Escape text for interpolation into an HTML-mode message.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
