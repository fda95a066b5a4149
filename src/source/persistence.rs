//! Key-value persistence.
//!
//! Small pieces of state (cart count, session role) survive restarts through
//! a key→string store. Last write wins. Values are read once on start.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::PersistError;

/// Key→string storage.
///
/// Methods take `&self`; implementations use interior mutability so one
/// store can be shared by several state holders.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistError>;
    fn remove(&self, key: &str) -> Result<(), PersistError>;
}

// =============================================================================
// Memory
// =============================================================================

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

// =============================================================================
// JSON file
// =============================================================================

/// Whole-map snapshot in a single JSON object file.
///
/// The file is read when opened and rewritten after every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "persistence.discard_malformed");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "persistence.read_failed");
                BTreeMap::new()
            }
        };

        Self {
            path,
            entries: RefCell::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PersistError> {
        let text = serde_json::to_string_pretty(&*self.entries.borrow())?;
        std::fs::write(&self.path, text).map_err(|error| PersistError::Io {
            path: self.path.clone(),
            error,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        let removed = self.entries.borrow_mut().remove(key).is_some();
        if removed { self.flush() } else { Ok(()) }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_last_write_wins() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cartCount"), None);

        store.set("cartCount", "1").unwrap();
        store.set("cartCount", "4").unwrap();
        assert_eq!(store.get("cartCount").as_deref(), Some("4"));

        store.remove("cartCount").unwrap();
        assert_eq!(store.get("cartCount"), None);
    }

    #[test]
    fn test_json_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let store = JsonFileStore::open(&path);
            store.set("userRole", "ADMIN").unwrap();
            store.set("cartCount", "2").unwrap();
            store.remove("cartCount").unwrap();
        }

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("userRole").as_deref(), Some("ADMIN"));
        assert_eq!(reopened.get("cartCount"), None);
    }

    #[test]
    fn test_json_file_store_tolerates_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("anything"), None);

        store.set("k", "v").unwrap();
        assert_eq!(JsonFileStore::open(&path).get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_json_file_store_missing_directory_reports_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("state.json");

        let store = JsonFileStore::open(&path);
        let err = store.set("k", "v").unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
    }
}
