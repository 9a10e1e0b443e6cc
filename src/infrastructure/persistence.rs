//! Key-value persistence for the serialized menu and history collections.

use crate::domain::StoreError;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error};

/// Local key-value storage holding whole serialized collections.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key has never been set.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<key>.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn io_error(key: &str, source: std::io::Error) -> StoreError {
        error!(key, error = %source, "store I/O failure");
        StoreError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|e| Self::io_error(key, e))?;

        // Write beside the target and rename so a crash never leaves half a payload.
        let target = self.path_for(key);
        let staging = self.root.join(format!(".{}.json.tmp", key));
        fs::write(&staging, value).map_err(|e| Self::io_error(key, e))?;
        fs::rename(&staging, &target).map_err(|e| Self::io_error(key, e))?;

        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}

/// HashMap-backed store for tests and throwaway sessions.
///
/// `set_failing(true)` makes every operation fail and `set_failing_key`
/// fails a single key, which is how callers exercise their
/// persistence-error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    failing: AtomicBool,
    failing_keys: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_failing_key(&self, key: &str, failing: bool) {
        if let Ok(mut keys) = self.failing_keys.write() {
            if failing {
                keys.insert(key.to_string());
            } else {
                keys.remove(key);
            }
        }
    }

    fn check_available(&self, key: &str) -> Result<(), StoreError> {
        let key_failing = self
            .failing_keys
            .read()
            .map_err(|_| Self::poisoned())?
            .contains(key);
        if key_failing || self.failing.load(Ordering::SeqCst) {
            error!(key, "memory store is failing");
            return Err(StoreError::Unavailable(format!("write to '{}' rejected", key)));
        }
        Ok(())
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("lock poisoned".to_string())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_available(key)?;
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_available(key)?;
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_available(key)?;
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
