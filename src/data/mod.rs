//! Reading normalization and the debounce engine.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "2m", "90s")
//! - [`readings`]: Builds a [`PortSnapshot`](simwatch_types::PortSnapshot) from page content
//! - [`transition`]: The per-channel state machine ([`DebouncePolicy`])
//!
//! ## Data Flow
//!
//! ```text
//! status page (raw HTML)
//!        │
//!        ▼
//! readings::build_snapshot()
//!        │
//!        ▼
//! DebouncePolicy::evaluate(snapshot, prior state, now)
//!        │
//!        ├──▶ StateSnapshot (persisted)
//!        │
//!        └──▶ AlertEvent list (notified)
//! ```

pub mod duration;
pub mod readings;
pub mod transition;

pub use readings::build_snapshot;
pub use transition::{DebouncePolicy, Evaluation, Transition, DEFAULT_GRACE_PERIOD};
