//! Local key-value persistence
//!
//! The snapshot store only needs `get`/`set` of whole string values. The
//! production store keeps one file per key inside the data directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::constants::config::APP_DIR;

pub trait KeyValueStore {
    /// Value stored under `key`, `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Default data directory (`$XDG_DATA_HOME/roster-board` or platform equivalent)
pub fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!(key, path = %path.display(), "Key not present in store");
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory {:?}", self.dir))?;
        let path = self.path_for(key);
        // readers never observe a partially written file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("Failed to write {:?}", tmp))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to move {:?} into place", tmp))?;
        info!(key, path = %path.display(), bytes = value.len(), "Saved store value");
        Ok(())
    }
}

/// In-memory store for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("roster-board-{tag}-{}", std::process::id()))
    }

    #[test]
    fn test_file_store_absent_key() {
        let store = JsonFileStore::new(temp_dir("absent"));
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_get_overwrite() {
        let dir = temp_dir("set");
        let mut store = JsonFileStore::new(&dir);
        store.set("roster-board.saved-rosters", "[]").unwrap();
        assert_eq!(store.get("roster-board.saved-rosters").unwrap().as_deref(), Some("[]"));

        store.set("roster-board.saved-rosters", "[1]").unwrap();
        assert_eq!(store.get("roster-board.saved-rosters").unwrap().as_deref(), Some("[1]"));
        assert!(dir.join("roster-board.saved-rosters.json").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_sanitizes_key() {
        let store = JsonFileStore::new("/data");
        assert_eq!(store.path_for("../evil key"), PathBuf::from("/data/.._evil_key.json"));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
