use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::app::state::{TeamupState, STATE_VERSION};
use crate::error::StoreError;

// ============================================================================
// FUNCTIONAL CORE: Pure functions for serialization and validation
// ============================================================================

/// Serialize the whole state to pretty JSON.
pub fn serialize_state(state: &TeamupState) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Deserialize and validate a state document.
///
/// Rejects unknown schema versions and repairs placement invariants (duplicate
/// or multiply-placed users, empty teams, zero team size).
pub fn deserialize_state(content: &str) -> Result<TeamupState, StoreError> {
    let mut state: TeamupState = serde_json::from_str(content)?;
    if state.version != STATE_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: state.version,
            expected: STATE_VERSION,
        });
    }
    let repairs = state.repair();
    if repairs > 0 {
        tracing::warn!(repairs, "repaired inconsistent roster data on load");
    }
    Ok(state)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Sibling path an unloadable state file is moved to, stamped with `now`.
fn quarantine_path(path: &Path, now: DateTime<Utc>) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".corrupt-{}", now.format("%Y%m%dT%H%M%S%.3fZ")));
    path.with_file_name(name)
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

// ============================================================================
// IMPERATIVE SHELL: whole-file load and save
// ============================================================================

/// The single JSON file holding all teamup state.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state file. A missing file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<TeamupState>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&self.path, e)),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        deserialize_state(&content).map(Some)
    }

    /// Load, falling back to empty state on a missing or unreadable file.
    ///
    /// An unreadable file is moved aside first so the next save cannot
    /// overwrite it.
    pub fn load_or_default(&self) -> TeamupState {
        match self.load() {
            Ok(Some(state)) => {
                tracing::info!(
                    path = %self.path.display(),
                    scopes = state.scopes.len(),
                    nicknames = state.nicknames.len(),
                    "loaded state"
                );
                state
            }
            Ok(None) => {
                tracing::info!(path = %self.path.display(), "no saved state, starting empty");
                TeamupState::new()
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "failed to load state, starting empty");
                match self.quarantine() {
                    Ok(moved) => {
                        tracing::warn!(moved_to = %moved.display(), "kept unreadable state file");
                    }
                    Err(qe) => {
                        tracing::error!(error = %qe, "could not move unreadable state file aside; next save replaces it");
                    }
                }
                TeamupState::new()
            }
        }
    }

    /// Move the current state file to a timestamped sibling. Returns the new path.
    pub fn quarantine(&self) -> Result<PathBuf, StoreError> {
        let target = quarantine_path(&self.path, Utc::now());
        fs::rename(&self.path, &target).map_err(|e| io_error(&self.path, e))?;
        Ok(target)
    }

    /// Overwrite the state file: write a sibling temp file, then rename over.
    pub fn save(&self, state: &TeamupState) -> Result<(), StoreError> {
        let content = serialize_state(state)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp).map_err(|e| io_error(&tmp, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| io_error(&tmp, e))?;
        file.sync_all().map_err(|e| io_error(&tmp, e))?;
        drop(file);
        fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;
        Ok(())
    }
}
