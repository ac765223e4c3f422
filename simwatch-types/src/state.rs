//! Persisted per-channel state.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};

use crate::{ChannelKey, Reading};

/// Everything remembered about one channel between polling runs.
///
/// `since` moves only when the normalized value changes. `alert_sent` is
/// true only inside a down-period that has already been escalated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelState {
    /// Last observed normalized reading.
    pub value: Reading,

    /// When `value` last changed to what it is now.
    pub since: DateTime<Utc>,

    /// A down alert was already sent for the current down-period.
    #[cfg_attr(feature = "serde", serde(alias = "alertSent", default))]
    pub alert_sent: bool,
}

impl ChannelState {
    pub fn new(value: Reading, since: DateTime<Utc>) -> Self {
        Self {
            value,
            since,
            alert_sent: false,
        }
    }

    /// State assumed for a channel that has never been observed.
    pub fn cold(now: DateTime<Utc>) -> Self {
        Self::new(Reading::down(), now)
    }

    /// How long the current value has held at `now`.
    pub fn held_for(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.since
    }
}

/// The whole persisted state: one entry per channel ever observed.
pub type StateSnapshot = BTreeMap<ChannelKey, ChannelState>;

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_cold_state() {
        let now = at("2024-01-01T00:00:00Z");
        let state = ChannelState::cold(now);
        assert!(state.value.is_down());
        assert_eq!(state.since, now);
        assert!(!state.alert_sent);
    }

    #[test]
    fn test_held_for() {
        let state = ChannelState::new(Reading::new("Y"), at("2024-01-01T00:00:00Z"));
        assert_eq!(
            state.held_for(at("2024-01-01T00:02:30Z")),
            TimeDelta::seconds(150)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let mut snapshot = StateSnapshot::new();
        snapshot.insert(
            ChannelKey::GsmSim,
            ChannelState {
                value: Reading::down(),
                since: at("2024-01-01T00:00:00Z"),
                alert_sent: true,
            },
        );
        snapshot.insert(
            ChannelKey::StatusLine,
            ChannelState::new(Reading::new("Idle"), at("2024-01-01T00:03:00Z")),
        );

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: StateSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(snapshot, parsed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_accepts_camel_case_flag() {
        let json = r#"{"value": "N", "since": "2024-01-01T00:00:00+00:00", "alertSent": true}"#;
        let state: ChannelState = serde_json::from_str(json).unwrap();
        assert!(state.alert_sent);
        assert_eq!(state.since, at("2024-01-01T00:00:00Z"));
    }
}
