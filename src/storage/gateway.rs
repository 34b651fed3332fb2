// Persistence gateway - load/save of the library snapshot
//
// Only the performance list is durable. Ephemeral fields (selection, view
// toggles, the active flag) are rebuilt as defaults on load, so the stored
// form is a plain JSON array of {name, id, tempo, notes} objects under a
// fixed file name.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::library::state::{LibraryState, Performance};

/// File name of the persisted performance list inside the app data dir.
pub const STORAGE_FILE: &str = "performances.json";

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load/save contract for the full library snapshot.
///
/// `load` returns `Ok(None)` when no prior snapshot exists, in which case the
/// caller falls back to the built-in seed state.
pub trait PersistenceGateway {
    fn save(&self, state: &LibraryState) -> Result<(), StorageError>;
    fn load(&self) -> Result<Option<LibraryState>, StorageError>;
}

/// File-backed gateway storing the performance list as JSON.
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional location under the platform data directory, or the
    /// working directory when none is available.
    pub fn at_default_path() -> Self {
        let dir = dirs::data_dir()
            .map(|d| d.join("setlist-metronome"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceGateway for JsonFileGateway {
    fn save(&self, state: &LibraryState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&state.performances)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<LibraryState>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        let performances: Vec<Performance> = serde_json::from_str(&json)?;
        Ok(Some(LibraryState::with_performances(performances)))
    }
}

/// In-memory gateway for tests. Clones share the same slot, so a test can
/// hand one clone to the store and inspect the other.
#[derive(Clone, Default)]
pub struct MemoryGateway {
    slot: Rc<RefCell<Option<Vec<Performance>>>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceGateway for MemoryGateway {
    fn save(&self, state: &LibraryState) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = Some(state.performances.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<LibraryState>, StorageError> {
        Ok(self
            .slot
            .borrow()
            .clone()
            .map(LibraryState::with_performances))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_gateway_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileGateway::new(dir.path().join(STORAGE_FILE));

        let state = LibraryState::seed();
        gateway.save(&state).unwrap();

        let loaded = gateway.load().unwrap().expect("snapshot present");
        assert_eq!(loaded.performances, state.performances);
        // Ephemeral fields come back as defaults, not as they were saved.
        assert_eq!(loaded.selected_performance_id, None);
        assert!(!loaded.performance_active);
    }

    #[test]
    fn test_file_gateway_absent_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileGateway::new(dir.path().join(STORAGE_FILE));
        assert!(gateway.load().unwrap().is_none());
    }

    #[test]
    fn test_file_gateway_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileGateway::new(dir.path().join("nested/deeper").join(STORAGE_FILE));
        gateway.save(&LibraryState::seed()).unwrap();
        assert!(gateway.path().exists());
    }

    #[test]
    fn test_file_gateway_rejects_corrupt_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        fs::write(&path, "not json").unwrap();
        let gateway = JsonFileGateway::new(path);
        assert!(matches!(gateway.load(), Err(StorageError::Json(_))));
    }

    #[test]
    fn test_memory_gateway_shares_slot_across_clones() {
        let gateway = MemoryGateway::new();
        let other = gateway.clone();
        gateway.save(&LibraryState::seed()).unwrap();
        assert_eq!(other.load().unwrap().unwrap().performances.len(), 3);
    }
}
