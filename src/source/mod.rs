//! Status page sources.
//!
//! This module provides a trait-based abstraction for obtaining the raw
//! status page: from the device over HTTP, or from a saved HTML file for
//! offline evaluation and fixture replay.

mod device;
mod file;

pub use device::DeviceSource;
pub use file::FileSource;

use std::fmt::Debug;

use async_trait::async_trait;
use simwatch_adapters::AdapterError;

/// Trait for retrieving the device status page.
///
/// # Example
///
/// ```no_run
/// use simwatch::{FileSource, StatusSource};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let source = FileSource::new("status.html");
///     let page = source.fetch().await?;
///     println!("{} bytes from {}", page.len(), source.description());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait StatusSource: Send + Sync + Debug {
    /// Fetch the current page.
    ///
    /// Implementations must bound the time spent; a timeout is reported as
    /// [`AdapterError::Timeout`], never as a hang.
    async fn fetch(&self) -> Result<String, AdapterError>;

    /// Returns a human-readable description of the source for logs.
    fn description(&self) -> &str;
}
