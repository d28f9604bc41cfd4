// Storage port module
// Synchronous key-value persistence behind an injectable get/set surface

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;
use tracing::warn;

/// Failure raised on the storage boundary
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write storage file: {0}")]
    Write(#[source] io::Error),
    #[error("failed to serialize storage contents: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Synchronous key-value persistence surface
///
/// Reads fall back to `None` for missing or unreadable data; writes report
/// their failure so the caller can decide how to degrade.
pub trait StoragePort {
    /// Fetch the stored value for a key
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store a value under a key
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage backed by a shared map
///
/// Cloned handles see the same entries, so two consumers observe each
/// other's writes the way they would against one browser storage area.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage
    pub fn new() -> Self {
        MemoryStorage {
            entries: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl StoragePort for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage holding the whole key-value map in one JSON file
pub struct FileStorage {
    /// Path of the backing file
    path: PathBuf,
    /// Entries loaded lazily on first access
    entries: RefCell<Option<HashMap<String, String>>>,
}

impl FileStorage {
    /// Create storage over a file path; the file is not read until first use
    pub fn new(path: PathBuf) -> Self {
        FileStorage {
            path,
            entries: RefCell::new(None),
        }
    }

    fn load(&self) -> HashMap<String, String> {
        match fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|err| {
                warn!(
                    "discarding unparsable storage file {}: {}",
                    self.path.display(),
                    err
                );
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(StorageError::Write)?;
            }
        }

        let data = serde_json::to_string_pretty(entries).map_err(StorageError::Serialize)?;
        fs::write(&self.path, data).map_err(StorageError::Write)
    }
}

impl StoragePort for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.borrow_mut();
        let map = entries.get_or_insert_with(|| self.load());
        map.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.borrow_mut();
        let map = entries.get_or_insert_with(|| self.load());
        map.insert(key.to_string(), value.to_string());
        self.save(map)
    }
}
