//! # simwatch-types
//!
//! Core types shared by the simwatch poller and its adapters. This crate
//! defines what a channel is, what a normalized reading looks like, and the
//! per-channel state that survives between polling runs.
//!
//! ## Design Goals
//!
//! - **One sentinel**: empty, missing and `"N"` readings all collapse into a
//!   single down marker ([`SENTINEL`]); there is no third state
//! - **Optional serialization**: enable the `serde` feature to persist
//!   [`StateSnapshot`] as JSON
//! - **No I/O**: everything here is plain data; fetching, parsing and
//!   persistence live in other crates
//!
//! ## Features
//!
//! - `serde`: serialization of [`ChannelKey`], [`Reading`] and [`ChannelState`]
//!
//! ## Example
//!
//! ```rust
//! use simwatch_types::{ChannelKey, PortSnapshot, Reading};
//!
//! let snapshot = PortSnapshot::builder(1)
//!     .reading(ChannelKey::GsmSim, Reading::new("Y"))
//!     .reading(ChannelKey::ModuleStatus, Reading::new(""))
//!     .build();
//!
//! assert_eq!(snapshot.len(), 2);
//! assert!(snapshot.get(ChannelKey::ModuleStatus).unwrap().is_down());
//! ```

mod channel;
mod event;
mod snapshot;
mod state;

pub use channel::*;
pub use event::*;
pub use snapshot::*;
pub use state::*;

/// The normalized marker for a down, empty or missing reading.
pub const SENTINEL: &str = "N";
