//! Debounced state transitions per channel.
//!
//! This module compares the current readings against the persisted state
//! and decides, channel by channel, whether a down alert or a recovery
//! notice is due.
//!
//! ```text
//!               value changes                  held down >= grace
//!   Healthy ────────────────────▶ Down ─────────────────────────▶ Down (alerted)
//!      ▲        (since = now)      │          emits DOWN             │
//!      │                           │ value changes                   │ value changes
//!      │   no event                │                                 │ emits RECOVERY
//!      └───────────────────────────┘                                 │
//!      └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Channels are independent: no channel's state influences another's.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use simwatch_types::{AlertEvent, ChannelKey, ChannelState, PortSnapshot, Reading, StateSnapshot};
use tracing::{debug, info};

/// Default grace period before a down channel is escalated.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(120);

/// Time-based alerting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebouncePolicy {
    /// Minimum contiguous down time before a DOWN alert is sent.
    pub grace_period: Duration,
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        Self {
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }
}

/// Outcome of evaluating one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State to persist for the channel.
    pub state: ChannelState,
    /// At most one DOWN or RECOVERY event.
    pub event: Option<AlertEvent>,
    /// The normalized value differs from the previous one.
    pub changed: bool,
}

/// Outcome of evaluating a whole port snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Complete state to persist, including channels absent from the snapshot.
    pub states: StateSnapshot,
    /// Events in channel order.
    pub events: Vec<AlertEvent>,
    /// Channels whose value changed this cycle.
    pub changed: Vec<ChannelKey>,
}

impl DebouncePolicy {
    pub fn new(grace_period: Duration) -> Self {
        Self { grace_period }
    }

    fn grace(&self) -> TimeDelta {
        TimeDelta::from_std(self.grace_period).unwrap_or(TimeDelta::MAX)
    }

    /// Apply one reading to a channel's prior state.
    ///
    /// A channel with no prior state starts cold: down since `now`, with no
    /// alert sent.
    pub fn apply(
        &self,
        key: ChannelKey,
        reading: &Reading,
        prior: Option<&ChannelState>,
        now: DateTime<Utc>,
    ) -> Transition {
        let observed = prior.is_some();
        let prior = prior.cloned().unwrap_or_else(|| ChannelState::cold(now));
        let changed = *reading != prior.value;

        let mut state = if changed {
            info!(
                key = %key,
                from = %prior.value,
                to = %reading,
                "Channel value changed"
            );
            ChannelState::new(reading.clone(), now)
        } else {
            prior.clone()
        };

        let event = if reading.is_down() {
            let elapsed = state.held_for(now);
            if elapsed < self.grace() {
                debug!(key = %key, elapsed_secs = elapsed.num_seconds(), "Down within grace period");
                None
            } else if state.alert_sent {
                None
            } else {
                info!(key = %key, elapsed_secs = elapsed.num_seconds(), "Channel down past grace period");
                state.alert_sent = true;
                Some(AlertEvent::down(key, state.since, now))
            }
        } else {
            state.alert_sent = false;
            match (prior.value.is_down(), prior.alert_sent) {
                (true, true) => {
                    info!(key = %key, "Channel recovered");
                    Some(AlertEvent::recovered(key, prior.since, now))
                }
                (true, false) if observed => {
                    info!(key = %key, "Channel recovered within grace period, not notifying");
                    None
                }
                _ => None,
            }
        };

        Transition {
            state,
            event,
            changed,
        }
    }

    /// Apply every reading of a snapshot to the prior state.
    ///
    /// Prior entries for channels the snapshot does not mention are carried
    /// over untouched.
    pub fn evaluate(
        &self,
        snapshot: &PortSnapshot,
        prior: &StateSnapshot,
        now: DateTime<Utc>,
    ) -> Evaluation {
        let mut evaluation = Evaluation {
            states: prior.clone(),
            ..Evaluation::default()
        };

        for (key, reading) in snapshot.iter() {
            let transition = self.apply(*key, reading, prior.get(key), now);
            if transition.changed {
                evaluation.changed.push(*key);
            }
            evaluation.events.extend(transition.event);
            evaluation.states.insert(*key, transition.state);
        }

        evaluation
    }
}
