//! Channel keys and normalized readings.

use core::fmt;
use core::str::FromStr;

use crate::SENTINEL;

/// A monitored field on the device status page.
///
/// The set is fixed; every configured port exposes the same four fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChannelKey {
    /// SIM-inserted indicator.
    GsmSim,
    /// Radio module status.
    ModuleStatus,
    /// GSM registration status.
    GsmStatus,
    /// Free-form status line.
    StatusLine,
}

impl ChannelKey {
    /// Every channel, in page order.
    pub const ALL: [ChannelKey; 4] = [
        ChannelKey::GsmSim,
        ChannelKey::ModuleStatus,
        ChannelKey::GsmStatus,
        ChannelKey::StatusLine,
    ];

    /// The field name used on the page and in the state file.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChannelKey::GsmSim => "gsm_sim",
            ChannelKey::ModuleStatus => "module_status",
            ChannelKey::GsmStatus => "gsm_status",
            ChannelKey::StatusLine => "status_line",
        }
    }

    /// Human-readable label for messages.
    pub const fn label(&self) -> &'static str {
        match self {
            ChannelKey::GsmSim => "SIM Inserted",
            ChannelKey::ModuleStatus => "Module Status",
            ChannelKey::GsmStatus => "GSM Status",
            ChannelKey::StatusLine => "Status Line",
        }
    }

    /// Element identifier of this field for a port: `l<port>_<field>`.
    pub fn element_id(&self, port: u16) -> String {
        format!("l{}_{}", port, self.as_str())
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown channel name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChannel(pub String);

impl fmt::Display for UnknownChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown channel: {}", self.0)
    }
}

impl std::error::Error for UnknownChannel {}

impl FromStr for ChannelKey {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}

/// A normalized value observed for a channel.
///
/// Construction always normalizes: surrounding whitespace is trimmed and an
/// empty result becomes [`SENTINEL`]. Any other text is a healthy reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub struct Reading(String);

impl Reading {
    /// Normalize raw extracted text into a reading.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            Self::down()
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Normalize an optional extraction; `None` means the field was missing.
    pub fn from_extracted(raw: Option<&str>) -> Self {
        raw.map_or_else(Self::down, Self::new)
    }

    /// The sentinel reading.
    pub fn down() -> Self {
        Self(SENTINEL.to_string())
    }

    /// True when this reading is the sentinel.
    pub fn is_down(&self) -> bool {
        self.0 == SENTINEL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self::down()
    }
}

impl From<String> for Reading {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for Reading {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Reading> for String {
    fn from(reading: Reading) -> Self {
        reading.0
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
