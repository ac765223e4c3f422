//! JSON state file.
//!
//! The whole [`StateSnapshot`] is read at the start of a cycle and written
//! back at the end. Reads never fail: a missing, unreadable or corrupt file
//! means "no history" and every channel starts cold. Writes go to a
//! temporary file in the same directory which then replaces the real one,
//! so a crash mid-write leaves the previous state intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use simwatch_types::{ChannelKey, ChannelState, StateSnapshot};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// File-backed store for channel state.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state, or an empty state if there is none.
    pub fn load(&self) -> StateSnapshot {
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to load previous state, starting cold");
                StateSnapshot::new()
            }
        }
    }

    fn try_load(&self) -> Result<StateSnapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file yet");
                return Ok(StateSnapshot::new());
            }
            Err(e) => return Err(e).context("Read error"),
        };

        let raw: BTreeMap<String, ChannelState> =
            serde_json::from_str(&content).context("Parse error")?;

        let mut state = StateSnapshot::new();
        for (name, entry) in raw {
            match name.parse::<ChannelKey>() {
                Ok(key) => {
                    state.insert(key, entry);
                }
                Err(e) => warn!(error = %e, "Dropping unknown channel from state file"),
            }
        }
        Ok(state)
    }

    /// Atomically replace the persisted state.
    pub fn save(&self, state: &StateSnapshot) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let json = serde_json::to_string_pretty(state)?;
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), channels = state.len(), "State saved");
        Ok(())
    }
}
