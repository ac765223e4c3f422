//! Snapshot building: raw page content to normalized readings.

use simwatch_adapters::html::FieldExtractor;
use simwatch_types::{ChannelKey, PortSnapshot, Reading};
use tracing::debug;

/// Build the current readings of `port` from the status page.
///
/// Every channel gets a reading. A field the extractor cannot find, or one
/// that holds only whitespace, becomes the sentinel rather than an error.
pub fn build_snapshot(page: &str, port: u16, extractor: &dyn FieldExtractor) -> PortSnapshot {
    let mut snapshot = PortSnapshot::new(port);

    for key in ChannelKey::ALL {
        let id = key.element_id(port);
        let raw = extractor.extract(page, &id);
        if raw.is_none() {
            debug!(field = %id, "Field missing from status page");
        }
        snapshot.insert(key, Reading::from_extracted(raw.as_deref()));
    }

    snapshot
}
