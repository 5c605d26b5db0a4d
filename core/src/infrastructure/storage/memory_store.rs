use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    domain::{common::entities::app_errors::CoreError, storage::ports::KeyValueStore},
    infrastructure::storage::{Items, serialize_within_quota},
};

/// Process-local store. Clones share the same items.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    items: Arc<Mutex<Items>>,
    quota: Option<u64>,
}

impl InMemoryKeyValueStore {
    pub fn with_quota(quota: u64) -> Self {
        Self {
            items: Arc::default(),
            quota: Some(quota),
        }
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = items.clone();
        next.insert(key.to_string(), value.to_string());
        serialize_within_quota(&next, self.quota)?;
        *items = next;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}
