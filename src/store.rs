//! Durable key-value storage for values that outlive a round.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::StoreError;

/// Last-write-wins key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Store kept in memory for the lifetime of the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_owned(), value);
        let text = serde_json::to_string_pretty(&entries).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("highscore").unwrap(), None);
        store.set("highscore", json!(3)).unwrap();
        store.set("highscore", json!(5)).unwrap();
        assert_eq!(store.get("highscore").unwrap(), Some(json!(5)));
    }

    #[test]
    fn file_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get("highscore").unwrap(), None);
        store.set("highscore", json!(12)).unwrap();
        store.set("player", json!("snek")).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("highscore").unwrap(), Some(json!(12)));
        assert_eq!(reopened.get("player").unwrap(), Some(json!("snek")));
    }

    #[test]
    fn file_store_reports_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.get("highscore"),
            Err(StoreError::Malformed { .. })
        ));
    }
}
