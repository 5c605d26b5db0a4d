use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    credential::{
        entities::{CredentialSource, CredentialStatus, ResolvedCredential},
        ports::CredentialService,
    },
    food_analysis::ports::LLMClient,
    storage::ports::KeyValueStore,
};

pub const API_KEY_STORAGE_KEY: &str = "nutrilens_gemini_api_key";

impl<KV, LLM> Service<KV, LLM>
where
    KV: KeyValueStore,
    LLM: LLMClient,
{
    fn injected_credential(&self) -> Option<ResolvedCredential> {
        self.injected_api_key
            .as_deref()
            .and_then(|value| ResolvedCredential::new(value, CredentialSource::Injected))
    }

    fn stored_credential(&self) -> Option<ResolvedCredential> {
        match self.store.get_item(API_KEY_STORAGE_KEY) {
            Ok(Some(value)) => ResolvedCredential::new(&value, CredentialSource::Stored),
            Ok(None) => None,
            Err(e) => {
                tracing::error!(error = %e, "failed to read stored API key");
                None
            }
        }
    }
}

impl<KV, LLM> CredentialService for Service<KV, LLM>
where
    KV: KeyValueStore,
    LLM: LLMClient,
{
    fn resolve_credential(&self) -> Option<ResolvedCredential> {
        self.injected_credential().or_else(|| self.stored_credential())
    }

    #[instrument(skip_all)]
    fn store_credential(&self, credential: &str) -> Result<(), CoreError> {
        if self.injected_credential().is_some() {
            return Err(CoreError::CredentialNotEditable);
        }
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(CoreError::EmptyCredential);
        }

        match self.store.set_item(API_KEY_STORAGE_KEY, credential) {
            Ok(()) => tracing::info!("API key saved"),
            Err(e) => tracing::error!(error = %e, "failed to save API key"),
        }
        Ok(())
    }

    #[instrument(skip_all)]
    fn clear_credential(&self) -> Result<(), CoreError> {
        if self.injected_credential().is_some() {
            return Err(CoreError::CredentialNotEditable);
        }

        match self.store.remove_item(API_KEY_STORAGE_KEY) {
            Ok(()) => tracing::info!("API key cleared"),
            Err(e) => tracing::error!(error = %e, "failed to clear API key"),
        }
        Ok(())
    }

    fn credential_status(&self) -> CredentialStatus {
        CredentialStatus::from(self.resolve_credential().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            food_analysis::services::tests::StubLLMClient, notification::NotificationBus,
            storage::ports::MockKeyValueStore,
        },
        infrastructure::storage::memory_store::InMemoryKeyValueStore,
    };

    fn service_with<KV: KeyValueStore>(
        store: KV,
        injected: Option<&str>,
    ) -> Service<KV, StubLLMClient> {
        Service::new(
            store,
            StubLLMClient::default(),
            injected.map(str::to_string),
            NotificationBus::new(),
        )
    }

    #[test]
    fn absent_everywhere_resolves_to_none() {
        let service = service_with(InMemoryKeyValueStore::default(), None);
        assert!(service.resolve_credential().is_none());
        assert_eq!(service.credential_status().source, None);
    }

    #[test]
    fn injected_key_wins_over_stored_key() {
        let store = InMemoryKeyValueStore::default();
        store.set_item(API_KEY_STORAGE_KEY, "stored-key").unwrap();
        let service = service_with(store, Some("injected-key"));

        let credential = service.resolve_credential().expect("credential");
        assert_eq!(credential.value(), "injected-key");
        assert_eq!(credential.source(), CredentialSource::Injected);
        assert!(!service.credential_status().editable);
    }

    #[test]
    fn injected_key_cannot_be_changed_or_cleared() {
        let store = InMemoryKeyValueStore::default();
        let service = service_with(store.clone(), Some("injected-key"));

        assert_eq!(
            service.store_credential("other"),
            Err(CoreError::CredentialNotEditable)
        );
        assert_eq!(service.clear_credential(), Err(CoreError::CredentialNotEditable));
        assert_eq!(store.get_item(API_KEY_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn whitespace_injected_key_falls_back_to_stored() {
        let store = InMemoryKeyValueStore::default();
        store.set_item(API_KEY_STORAGE_KEY, "stored-key").unwrap();
        let service = service_with(store, Some("   "));

        let credential = service.resolve_credential().expect("credential");
        assert_eq!(credential.source(), CredentialSource::Stored);
        assert!(service.credential_status().editable);
    }

    #[test]
    fn stored_key_is_trimmed_and_editable() {
        let store = InMemoryKeyValueStore::default();
        let service = service_with(store.clone(), None);

        service.store_credential("  my-key \n").expect("stored");
        assert_eq!(
            store.get_item(API_KEY_STORAGE_KEY).unwrap().as_deref(),
            Some("my-key")
        );
        assert_eq!(service.resolve_credential().unwrap().value(), "my-key");

        service.clear_credential().expect("cleared");
        assert!(service.resolve_credential().is_none());
    }

    #[test]
    fn whitespace_keys_are_never_persisted() {
        let store = InMemoryKeyValueStore::default();
        let service = service_with(store.clone(), None);

        assert_eq!(service.store_credential("  \t "), Err(CoreError::EmptyCredential));
        assert_eq!(store.get_item(API_KEY_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn whitespace_value_in_storage_is_absent() {
        let store = InMemoryKeyValueStore::default();
        store.set_item(API_KEY_STORAGE_KEY, "   ").unwrap();
        let service = service_with(store, None);
        assert!(service.resolve_credential().is_none());
    }

    #[test]
    fn storage_failures_are_swallowed() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set_item()
            .returning(|_, _| Err(CoreError::StorageUnavailable("disk full".to_string())));
        store
            .expect_remove_item()
            .returning(|_| Err(CoreError::StorageUnavailable("disk full".to_string())));
        store
            .expect_get_item()
            .returning(|_| Err(CoreError::StorageUnavailable("unreadable".to_string())));
        let service = service_with(store, None);

        assert_eq!(service.store_credential("key"), Ok(()));
        assert_eq!(service.clear_credential(), Ok(()));
        assert!(service.resolve_credential().is_none());
    }
}
