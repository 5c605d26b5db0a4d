use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use crate::{
    domain::{common::entities::app_errors::CoreError, storage::ports::KeyValueStore},
    infrastructure::storage::{Items, serialize_within_quota},
};

/// String key-value store persisted as one JSON object file.
///
/// Every call re-reads the file, so several stores on the same path see each
/// other's writes. Writes go through a temporary file and a rename.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    quota: Option<u64>,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>, quota: Option<u64>) -> Self {
        Self {
            path: path.into(),
            quota,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> Result<Items, CoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Items::new()),
            Err(e) => {
                return Err(CoreError::StorageUnavailable(format!(
                    "{}: {e}",
                    self.path.display()
                )));
            }
        };

        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "storage file is corrupt, starting empty"
            );
            Items::new()
        }))
    }

    fn write_items(&self, serialized: &str) -> Result<(), CoreError> {
        let unavailable =
            |e: io::Error| CoreError::StorageUnavailable(format!("{}: {e}", self.path.display()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized).map_err(unavailable)?;
        fs::rename(&tmp, &self.path).map_err(unavailable)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.read_items()?;
        items.insert(key.to_string(), value.to_string());
        let serialized = serialize_within_quota(&items, self.quota)?;
        self.write_items(&serialized)
    }

    fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.read_items()?;
        if items.remove(key).is_none() {
            return Ok(());
        }
        let serialized = serialize_within_quota(&items, None)?;
        self.write_items(&serialized)
    }
}
