use crate::domain::common::entities::app_errors::CoreError;

/// Durable string key-value storage, the local equivalent of a browser's
/// `localStorage`.
///
/// Implementations must make each call atomic with respect to other calls on
/// the same store.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Removing an absent key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), CoreError>;
}
