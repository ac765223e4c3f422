//! SIM bank status page client.
//!
//! The device serves a single HTML page with the state of every port. It is
//! protected by HTTP basic authentication; a wrong password is answered with
//! `401 Unauthorized`, which this client reports as [`AdapterError::Auth`] so
//! callers can tell it apart from an unreachable or failing device.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use simwatch_adapters::device::StatusPageClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StatusPageClient::builder()
//!         .endpoint("http://192.168.1.50/default/en_US")
//!         .credentials("admin", "secret")
//!         .timeout(Duration::from_secs(15))
//!         .build()?;
//!
//!     let html = client.fetch().await?;
//!     println!("{} bytes", html.len());
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::AdapterError;

/// Default page path appended to the endpoint.
pub const DEFAULT_STATUS_PATH: &str = "/status.html";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the device's status page.
#[derive(Debug, Clone)]
pub struct StatusPageClient {
    client: Client,
    endpoint: String,
    status_path: String,
    username: String,
    password: String,
}

impl StatusPageClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> StatusPageClientBuilder {
        StatusPageClientBuilder::default()
    }

    /// Full URL of the status page.
    pub fn url(&self) -> String {
        join_url(&self.endpoint, &self.status_path)
    }

    /// Fetch the raw status page.
    pub async fn fetch(&self) -> Result<String, AdapterError> {
        let response = self
            .client
            .get(self.url())
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AdapterError::Auth("Unauthorized (401)".to_string()));
        }

        if !response.status().is_success() {
            return Err(AdapterError::Http(format!(
                "Device returned status {}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }
}

/// Builder for StatusPageClient.
#[derive(Debug, Default)]
pub struct StatusPageClientBuilder {
    endpoint: Option<String>,
    status_path: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
}

impl StatusPageClientBuilder {
    /// Set the device base URL (e.g., "http://192.168.1.50").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the page path (default: "/status.html").
    pub fn status_path(mut self, path: impl Into<String>) -> Self {
        self.status_path = Some(path.into());
        self
    }

    /// Set the username and password for basic authentication.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request timeout (default: 15 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<StatusPageClient, AdapterError> {
        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(StatusPageClient {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| "http://localhost".to_string()),
            status_path: self
                .status_path
                .unwrap_or_else(|| DEFAULT_STATUS_PATH.to_string()),
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
