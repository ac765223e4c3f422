use std::time::Duration;

use anyhow::{bail, Result};
use chrono::TimeDelta;

/// Suffix to seconds multiplier (order matters: "ms" and "min" before "s" and "m")
const UNITS: &[(&str, f64)] = &[
    ("ms", 0.001),
    ("min", 60.0),
    ("s", 1.0),
    ("m", 60.0),
    ("h", 3600.0),
];

/// Parse duration strings like "2m", "90s", "1.5min", "500ms", "1h"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            if !val.is_finite() || val < 0.0 {
                bail!("Duration must be a non-negative number: {}", s);
            }
            return Duration::try_from_secs_f64(val * multiplier)
                .map_err(|_| anyhow::anyhow!("Duration out of range: {}", s));
        }
    }

    bail!("Unknown duration format: {}", s)
}

/// Format a duration for messages: "45s", "2m", "2m 30s", "1h 5m"
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        match secs % 60 {
            0 => format!("{}m", secs / 60),
            rem => format!("{}m {}s", secs / 60, rem),
        }
    } else {
        match (secs % 3600) / 60 {
            0 => format!("{}h", secs / 3600),
            mins => format!("{}h {}m", secs / 3600, mins),
        }
    }
}

/// Format a signed chrono delta; negative spans (clock skew) show as "0s".
pub fn format_delta(delta: TimeDelta) -> String {
    format_duration(delta.to_std().unwrap_or_default())
}
