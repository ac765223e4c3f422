//! User-visible alert events produced by the transition engine.

use chrono::{DateTime, TimeDelta, Utc};

use crate::ChannelKey;

/// What happened to a channel in this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// The channel has been down for at least the grace period.
    Down {
        /// Start of the down-period.
        since: DateTime<Utc>,
        /// How long it has been down so far.
        elapsed: TimeDelta,
    },
    /// The channel left an escalated down-period.
    Recovered {
        /// Start of the down-period that just ended.
        down_since: DateTime<Utc>,
        /// Total length of that down-period.
        downtime: TimeDelta,
    },
}

/// A single alert or recovery notice for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEvent {
    pub key: ChannelKey,
    pub kind: AlertKind,
    /// Evaluation time that produced the event.
    pub at: DateTime<Utc>,
}

impl AlertEvent {
    pub fn down(key: ChannelKey, since: DateTime<Utc>, at: DateTime<Utc>) -> Self {
        Self {
            key,
            kind: AlertKind::Down {
                since,
                elapsed: at - since,
            },
            at,
        }
    }

    pub fn recovered(key: ChannelKey, down_since: DateTime<Utc>, at: DateTime<Utc>) -> Self {
        Self {
            key,
            kind: AlertKind::Recovered {
                down_since,
                downtime: at - down_since,
            },
            at,
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(self.kind, AlertKind::Down { .. })
    }

    pub fn is_recovery(&self) -> bool {
        matches!(self.kind, AlertKind::Recovered { .. })
    }
}
