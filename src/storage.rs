use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::StorageError;

/// A persistent string-keyed store, the on-disk counterpart of browser local storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store, used by tests and when no file is wanted
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// All keys in a single JSON object file, replaced atomically on every `set`
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing or unreadable file opens as an empty store.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(e) => {
                warn!("Ignoring unreadable store {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    fn read(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        if !path.exists() {
            debug!("No store at {}, starting empty", path.display());
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string_pretty(&self.values)?;

        // The previous file stays whole until the rename.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        assert!(store.get("favorites").is_none());
        store.set("favorites", "[]").unwrap();
        store.set("favorites", "[\"1\"]").unwrap();
        assert_eq!(store.get("favorites").as_deref(), Some("[\"1\"]"));
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn test_file_store_set_leaves_only_store_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = FileStore::open(&path);
        store.set("favorites", "[\"1\"]").unwrap();
        store.set("darkMode", "true").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("store.json")]);

        let on_disk: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 2);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json"));
        assert!(store.get("favorites").is_none());
    }
}
