//! Key/value storage persisted as one JSON document.
//!
//! This is the on-disk counterpart of a browser's `localStorage`: callers
//! address entries by a namespaced key and each write flushes the whole
//! document atomically.

use super::atomic::{atomic_read_json, atomic_write_json};
use crate::{MyIndexError, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Persistent key/value storage backed by a JSON file.
pub struct LocalStorage {
    path: PathBuf,
    entries: Mutex<Map<String, Value>>,
}

impl LocalStorage {
    /// Open storage at `path`, loading existing entries if the file exists.
    ///
    /// A corrupt file is logged and treated as empty; it is overwritten on
    /// the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match atomic_read_json::<Map<String, Value>>(&path) {
            Ok(Some(entries)) => entries,
            Ok(None) => Map::new(),
            Err(e @ MyIndexError::Json { .. }) => {
                warn!("Discarding unreadable storage {}: {}", path.display(), e);
                Map::new()
            }
            Err(e) => return Err(e),
        };
        debug!("Opened storage {} ({} keys)", path.display(), entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and deserialize the entry under `key`.
    ///
    /// Returns `None` when the key is absent.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` under `key` and flush to disk.
    ///
    /// The in-memory entries only change once the file is written.
    pub fn set_item<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let mut next = entries.clone();
        next.insert(key.to_string(), value);
        atomic_write_json(&self.path, &next, false)?;
        *entries = next;
        Ok(())
    }

    /// Remove the entry under `key`. Returns whether it existed.
    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if !entries.contains_key(key) {
            return Ok(false);
        }
        let mut next = entries.clone();
        next.remove(key);
        atomic_write_json(&self.path, &next, false)?;
        *entries = next;
        Ok(true)
    }

    /// All keys currently stored.
    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.keys().cloned().collect()
    }
}
