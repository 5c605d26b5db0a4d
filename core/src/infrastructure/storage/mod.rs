use std::collections::BTreeMap;

use crate::domain::common::entities::app_errors::CoreError;

pub mod file_store;
pub mod memory_store;

pub use file_store::FileKeyValueStore;
pub use memory_store::InMemoryKeyValueStore;

pub(crate) type Items = BTreeMap<String, String>;

/// Serializes `items`, refusing when the result would exceed `quota` bytes.
pub(crate) fn serialize_within_quota(items: &Items, quota: Option<u64>) -> Result<String, CoreError> {
    let serialized =
        serde_json::to_string(items).map_err(|e| CoreError::StorageUnavailable(e.to_string()))?;

    if let Some(quota) = quota {
        let required = serialized.len() as u64;
        if required > quota {
            return Err(CoreError::StorageQuotaExceeded { required, quota });
        }
    }
    Ok(serialized)
}
