//! HTTP source backed by the device's status page.

use async_trait::async_trait;
use simwatch_adapters::device::StatusPageClient;
use simwatch_adapters::AdapterError;

use super::StatusSource;
use crate::config::MonitorConfig;

/// Fetches the status page from the SIM bank.
#[derive(Debug)]
pub struct DeviceSource {
    client: StatusPageClient,
    description: String,
}

impl DeviceSource {
    pub fn new(client: StatusPageClient) -> Self {
        let description = format!("device: {}", client.url());
        Self {
            client,
            description,
        }
    }

    /// Build a source from the monitor configuration.
    pub fn from_config(config: &MonitorConfig) -> Result<Self, AdapterError> {
        let client = StatusPageClient::builder()
            .endpoint(&config.device_url)
            .status_path(&config.status_path)
            .credentials(&config.username, &config.password)
            .timeout(config.fetch_timeout)
            .build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl StatusSource for DeviceSource {
    async fn fetch(&self) -> Result<String, AdapterError> {
        self.client.fetch().await
    }

    fn description(&self) -> &str {
        &self.description
    }
}
