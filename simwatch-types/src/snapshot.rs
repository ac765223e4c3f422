//! PortSnapshot - the readings of one port at one poll.

use std::collections::BTreeMap;

use crate::{ChannelKey, Reading};

/// Current readings for every channel of a port.
///
/// Built once per poll from the status page and handed to the transition
/// engine. Channels the page did not mention are simply absent.
///
/// # Example
///
/// ```rust
/// use simwatch_types::{ChannelKey, PortSnapshot, Reading};
///
/// let snapshot = PortSnapshot::builder(2)
///     .reading(ChannelKey::GsmSim, Reading::new("Y"))
///     .build();
///
/// assert_eq!(snapshot.port, 2);
/// assert!(!snapshot.get(ChannelKey::GsmSim).unwrap().is_down());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSnapshot {
    /// Port number the readings belong to.
    pub port: u16,

    /// Normalized readings keyed by channel.
    pub readings: BTreeMap<ChannelKey, Reading>,
}

impl PortSnapshot {
    /// Create an empty snapshot for a port.
    pub fn new(port: u16) -> Self {
        Self {
            port,
            readings: BTreeMap::new(),
        }
    }

    pub fn builder(port: u16) -> PortSnapshotBuilder {
        PortSnapshotBuilder::new(port)
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn get(&self, key: ChannelKey) -> Option<&Reading> {
        self.readings.get(&key)
    }

    pub fn insert(&mut self, key: ChannelKey, reading: Reading) {
        self.readings.insert(key, reading);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChannelKey, &Reading)> {
        self.readings.iter()
    }

    /// Channels currently reading the sentinel.
    pub fn down_channels(&self) -> impl Iterator<Item = ChannelKey> + '_ {
        self.readings
            .iter()
            .filter(|(_, reading)| reading.is_down())
            .map(|(key, _)| *key)
    }
}

/// Builder for constructing `PortSnapshot` instances.
#[derive(Debug)]
pub struct PortSnapshotBuilder {
    snapshot: PortSnapshot,
}

impl PortSnapshotBuilder {
    pub fn new(port: u16) -> Self {
        Self {
            snapshot: PortSnapshot::new(port),
        }
    }

    /// Add a reading for a channel.
    pub fn reading(mut self, key: ChannelKey, reading: Reading) -> Self {
        self.snapshot.insert(key, reading);
        self
    }

    pub fn build(self) -> PortSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_builder() {
        let snapshot = PortSnapshot::builder(1)
            .reading(ChannelKey::GsmSim, Reading::new("Y"))
            .reading(ChannelKey::ModuleStatus, Reading::new(""))
            .reading(ChannelKey::GsmStatus, Reading::new("N"))
            .build();

        assert_eq!(snapshot.len(), 3);
        assert_eq!(
            snapshot.down_channels().collect::<Vec<_>>(),
            vec![ChannelKey::ModuleStatus, ChannelKey::GsmStatus]
        );
        assert!(snapshot.get(ChannelKey::StatusLine).is_none());
    }
}
