//! # simwatch
//!
//! Watches one port of a GSM SIM bank and alerts a Telegram chat when a
//! channel stays down longer than a grace period, and again when it comes
//! back.
//!
//! The device exposes its state only as an HTML status page. Each run
//! fetches that page, pulls four fields for the configured port, compares
//! them with what the previous run saw and sends at most one message
//! summarising what changed.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                             Monitor                              │
//! │  ┌─────────┐    ┌──────────┐    ┌────────────┐    ┌──────────┐   │
//! │  │ source  │───▶│   data   │───▶│   notify   │───▶│ Telegram │   │
//! │  │ (page)  │    │(debounce)│    │ (messages) │    │ / stdout │   │
//! │  └─────────┘    └────┬─────┘    └────────────┘    └──────────┘   │
//! │                      │                                           │
//! │                      ▼                                           │
//! │                 ┌─────────┐                                      │
//! │                 │  store  │◀── statuses.json                     │
//! │                 └─────────┘                                      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Where the status page comes from ([`StatusSource`] trait):
//!   the device over HTTP, or a saved file
//! - **[`data`]**: Snapshot building and the per-channel debounce engine
//! - **[`notify`]**: Message formatting and delivery ([`Notifier`] trait)
//! - **[`store`]**: The JSON state file carried between runs
//! - **[`cycle`]**: [`Monitor`], which runs the above once per invocation
//! - **[`config`]**: Layered configuration (defaults, file, environment, flags)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # One cycle, suitable for cron
//! SIMWATCH_DEVICE_URL=http://10.0.0.5/default/en_US \
//! SIMWATCH_BOT_TOKEN=... SIMWATCH_CHAT_ID=... simwatch --port 3
//!
//! # Evaluate a saved page without sending or saving anything
//! simwatch --page-file status.html --dry-run
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use simwatch::{ConsoleNotifier, DebouncePolicy, FileSource, Monitor, StateStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let monitor = Monitor::new(
//!         Box::new(FileSource::new("status.html")),
//!         Box::new(ConsoleNotifier),
//!         StateStore::new("statuses.json"),
//!         DebouncePolicy::default(),
//!         1,
//!     );
//!     let report = monitor.run_cycle().await;
//!     println!("{} event(s)", report.events().len());
//! }
//! ```

pub mod config;
pub mod cycle;
pub mod data;
pub mod logging;
pub mod notify;
pub mod source;
pub mod store;

// Re-export main types for convenience
pub use config::{MonitorConfig, Overrides};
pub use cycle::{CycleReport, Monitor};
pub use data::{build_snapshot, DebouncePolicy, Evaluation, Transition, DEFAULT_GRACE_PERIOD};
pub use notify::{ConsoleNotifier, Notifier, TelegramNotifier};
pub use source::{DeviceSource, FileSource, StatusSource};
pub use store::StateStore;

pub use simwatch_types::{
    AlertEvent, AlertKind, ChannelKey, ChannelState, PortSnapshot, Reading, StateSnapshot,
    SENTINEL,
};
