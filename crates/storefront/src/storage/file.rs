//! JSON-file-backed key-value store.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;

use super::{KeyValueStore, StorageError};

/// A flat `{ "key": "value" }` JSON file.
///
/// The whole file is loaded on open and rewritten on every change. Writes
/// go to a sibling temp file first and are renamed into place, so a crash
/// never leaves a truncated file behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A file that is not valid JSON is logged and treated as empty; it is
    /// replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Ignoring corrupt storage file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries();
        let previous = entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).inspect_err(|_| {
            // Keep memory and disk in agreement
            match previous {
                Some(previous) => entries.insert(key.to_string(), previous),
                None => entries.remove(key),
            };
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries();
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };
        self.persist(&entries).inspect_err(|_| {
            entries.insert(key.to_string(), previous);
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut entries = self.entries();
        if entries.is_empty() {
            return Ok(());
        }
        let previous = std::mem::take(&mut *entries);
        self.persist(&entries).inspect_err(|_| {
            *entries = previous;
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("durable.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set("wishlist", "[]").unwrap();
        store.set("selectedGender", "1").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("selectedGender").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get("wishlist").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions").join("default.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set("appliedCoupon", "{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        store.set("cart", "x").unwrap();
        assert_eq!(
            JsonFileStore::open(&path).unwrap().get("cart").unwrap().as_deref(),
            Some("x")
        );
    }

    #[test]
    fn test_clear_and_remove_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        assert_eq!(JsonFileStore::open(&path).unwrap().get("a").unwrap(), None);

        store.clear().unwrap();
        assert_eq!(JsonFileStore::open(&path).unwrap().get("b").unwrap(), None);
    }
}
