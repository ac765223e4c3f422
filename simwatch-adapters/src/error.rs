//! Error types for adapters.

use thiserror::Error;

/// Errors that can occur when talking to an external system.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// HTTP request returned an unexpected status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Authentication failed (HTTP 401).
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// The remote API accepted the request but refused to act on it.
    #[error("API rejected request: {0}")]
    Api(String),

    /// Local I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdapterError {
    /// True for credential rejections, which are reported apart from
    /// network and status failures.
    pub fn is_auth(&self) -> bool {
        matches!(self, AdapterError::Auth(_))
    }

    /// True when the remote side never answered in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AdapterError::Timeout)
    }
}

#[cfg(any(feature = "device", feature = "telegram"))]
impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AdapterError::Timeout
        } else if err.is_connect() {
            AdapterError::Connection(err.to_string())
        } else {
            AdapterError::Http(err.to_string())
        }
    }
}
