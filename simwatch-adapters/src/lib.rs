//! # simwatch-adapters
//!
//! Clients for the external systems simwatch depends on. Each one is a thin,
//! independently usable wrapper; none of them knows about alerting policy.
//!
//! ## Supported Systems
//!
//! - **Device** (`device` feature) - Fetches the SIM bank status page over
//!   HTTP with basic authentication
//! - **HTML** (`html` feature) - Extracts the text of an element by its `id`
//! - **Telegram** (`telegram` feature) - Sends formatted messages through the
//!   Bot API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use simwatch_adapters::device::StatusPageClient;
//! use simwatch_adapters::html::{ElementIdExtractor, FieldExtractor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StatusPageClient::builder()
//!         .endpoint("http://192.168.1.50")
//!         .credentials("admin", "admin")
//!         .build()?;
//!
//!     let page = client.fetch().await?;
//!     let sim = ElementIdExtractor.extract(&page, "l1_gsm_sim");
//!     println!("SIM inserted: {:?}", sim);
//!     Ok(())
//! }
//! ```

pub mod error;

#[cfg(feature = "device")]
pub mod device;

#[cfg(feature = "html")]
pub mod html;

#[cfg(feature = "telegram")]
pub mod telegram;

pub use error::AdapterError;
