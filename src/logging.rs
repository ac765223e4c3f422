//! Tracing setup for the binary.
//!
//! Events go to stderr and, when a log path is configured, are appended
//! without colour codes to that file. `RUST_LOG` overrides the default
//! `simwatch=info` filter.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "simwatch=info,simwatch_adapters=info";

/// Install the global subscriber.
///
/// Failing to open the log file is not fatal: stderr logging still works
/// and the failure is reported once the subscriber is up.
pub fn init(log_path: Option<&Path>) {
    let (file, open_error) = match log_path.map(open_log_file) {
        Some(Ok(file)) => (Some(file), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    let file_layer = file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    if let (Some(path), Some(e)) = (log_path, open_error) {
        tracing::warn!(path = %path.display(), error = %e, "Cannot open log file, logging to stderr only");
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
