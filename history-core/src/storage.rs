//! Durable key/value storage on the local device.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{HistoryError, HistoryResult};

/// Key holding the serialized favorites list.
pub const FAVORITES_KEY: &str = "history-of-today-favorites";
/// Key holding the theme preference.
pub const THEME_KEY: &str = "theme";

/// A string store addressed by fixed keys.
pub trait Storage {
    fn get(&self, key: &str) -> HistoryResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> HistoryResult<()>;
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> HistoryResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| HistoryError::Storage(format!("Could not read {}: {e}", path.display())))
    }

    fn set(&mut self, key: &str, value: &str) -> HistoryResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            HistoryError::Storage(format!("Could not create {}: {e}", self.dir.display()))
        })?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        // Write then rename so a crash never leaves a half-written file
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// In-process storage, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.values.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> HistoryResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> HistoryResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
