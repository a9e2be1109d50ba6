//! Client-local key/value storage that survives between runs.
//!
//! Values are strings; structured values are stored as JSON text, the same
//! way a browser's local storage would hold them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{SchedulerError, SchedulerResult};

/// Last participant name chosen.
pub const NAME_KEY: &str = "name";
/// Last default status type chosen.
pub const TYPE_KEY: &str = "type";
/// JSON array of filtered names.
pub const FILTER_KEY: &str = "filter";
/// JSON boolean, true when the filter is a blacklist.
pub const FILTER_BLACKLIST_KEY: &str = "filterBlacklist";
/// JSON array of participants added here that have no entries on the server yet.
pub const PARTICIPANTS_KEY: &str = "participants";

pub trait LocalStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> SchedulerResult<()>;
    fn remove_item(&mut self, key: &str) -> SchedulerResult<()>;
}

/// Storage kept in memory only. Used when nothing should be persisted.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> SchedulerResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> SchedulerResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the storage file. A missing file is an empty storage.
    pub fn open(path: &Path) -> SchedulerResult<Self> {
        let values = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    SchedulerError::Storage(format!("Could not parse {}: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };

        Ok(FileStorage {
            path: path.to_path_buf(),
            values,
        })
    }

    fn flush(&self) -> SchedulerResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.values)
            .map_err(|e| SchedulerError::Serialization(e.to_string()))?;

        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> SchedulerResult<()> {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> SchedulerResult<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Read a JSON-encoded value, falling back to `default` when it is missing or
/// unreadable.
pub fn get_json<T: serde::de::DeserializeOwned>(
    storage: &dyn LocalStorage,
    key: &str,
    default: T,
) -> T {
    match storage.get_item(key) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring unreadable stored value");
                default
            }
        },
        None => default,
    }
}

pub fn set_json<T: serde::Serialize + ?Sized>(
    storage: &mut dyn LocalStorage,
    key: &str,
    value: &T,
) -> SchedulerResult<()> {
    let raw =
        serde_json::to_string(value).map_err(|e| SchedulerError::Serialization(e.to_string()))?;
    storage.set_item(key, &raw)
}
