//! Message texts (Telegram HTML subset).

use std::fmt::Write;
use std::time::Duration;

use simwatch_adapters::telegram::escape_html;
use simwatch_adapters::AdapterError;
use simwatch_types::{AlertEvent, AlertKind, ChannelKey, PortSnapshot};

use crate::data::duration::{format_delta, format_duration};

fn icon(key: ChannelKey) -> &'static str {
    match key {
        ChannelKey::GsmSim => "📍",
        ChannelKey::ModuleStatus => "🔗",
        ChannelKey::GsmStatus => "⚠",
        ChannelKey::StatusLine => "📡",
    }
}

/// One line per event.
pub fn event_line(event: &AlertEvent, grace_period: Duration) -> String {
    match event.kind {
        AlertKind::Down { .. } => format!(
            "❌ <b>{}</b> down for more than {}.",
            event.key,
            format_duration(grace_period)
        ),
        AlertKind::Recovered { downtime, .. } => format!(
            "✅ <b>{}</b> recovered after {}.",
            event.key,
            format_delta(downtime)
        ),
    }
}

/// Current value of every channel on the port.
pub fn summary(snapshot: &PortSnapshot) -> String {
    let mut text = format!("🧩 <b>SIM status (port {}):</b>", snapshot.port);
    for key in ChannelKey::ALL {
        let value = snapshot
            .get(key)
            .map(|reading| escape_html(reading.as_str()))
            .unwrap_or_else(|| "?".to_string());
        let _ = write!(text, "\n{} {}: <code>{}</code>", icon(key), key.label(), value);
    }
    text
}

/// The single message sent for a cycle's events, or `None` if there are none.
pub fn alert_message(
    events: &[AlertEvent],
    snapshot: &PortSnapshot,
    grace_period: Duration,
) -> Option<String> {
    if events.is_empty() {
        return None;
    }

    let lines: Vec<String> = events
        .iter()
        .map(|event| event_line(event, grace_period))
        .collect();

    Some(format!("{}\n\n{}", lines.join("\n"), summary(snapshot)))
}

/// Message for a cycle that could not read the device.
pub fn fetch_failure(error: &AdapterError) -> String {
    if error.is_auth() {
        format!(
            "🔒 <b>Device rejected credentials (401)</b>\n<code>{}</code>",
            escape_html(&error.to_string())
        )
    } else {
        format!(
            "❗ <b>Failed to fetch device status:</b>\n<code>{}</code>",
            escape_html(&error.to_string())
        )
    }
}
