//! Single-document JSON persistence for the application state.
//!
//! The entire state lives in one `state.json` under the data dir. Reads
//! that fail for any reason -- missing file, bad JSON, wrong shape -- fall
//! back to the default state via [`super::migrate`]; writes are
//! best-effort and callers typically drop the error (`let _ =`).

use std::path::PathBuf;

use crate::error::StorageError;
use crate::state::AppState;
use crate::storage::{data_dir, migrate};

/// State document file name.
const STATE_FILE: &str = "state.json";

/// Handle to the persisted state document.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    /// Document in the default data dir.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            path: data_dir()?.join(STATE_FILE),
        })
    }

    /// Document at an explicit path (tests).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load and migrate the state; any failure yields the default state
    /// anchored at `now_ms`.
    pub fn load(&self, now_ms: i64) -> AppState {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<serde_json::Value>(&content) {
                Ok(raw) => migrate::migrate(raw, now_ms),
                Err(_) => AppState::initial(now_ms),
            },
            Err(_) => AppState::initial(now_ms),
        }
    }

    /// Persist the state document.
    ///
    /// # Errors
    /// Returns an error when serialization or the write fails; callers on
    /// the app path ignore it by design.
    pub fn save(&self, state: &AppState) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(state)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }

    /// Remove the document (account deletion).
    pub fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::WriteFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
