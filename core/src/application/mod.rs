use crate::{
    domain::{
        common::{NutrilensConfig, services::Service},
        notification::NotificationBus,
    },
    infrastructure::{llm::GeminiLLMClient, storage::FileKeyValueStore},
};

pub type NutrilensService = Service<FileKeyValueStore, GeminiLLMClient>;

/// Wires the file-backed store and the Gemini client into one service.
pub fn create_service(config: &NutrilensConfig, notifications: NotificationBus) -> NutrilensService {
    let store = FileKeyValueStore::new(config.storage.storage_file(), config.storage.quota_bytes);
    let llm_client = GeminiLLMClient::new(&config.llm.api_base, &config.llm.gemini_model);

    tracing::debug!(
        storage = %store.path().display(),
        model = %config.llm.gemini_model,
        "service created"
    );

    Service::new(
        store,
        llm_client,
        config.llm.injected_api_key.clone(),
        notifications,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::{LLMConfig, StorageConfig},
        credential::{CredentialSource, ports::CredentialService},
        theme::{ColorTheme, ports::ThemeService},
    };

    fn config(data_dir: &std::path::Path, key: Option<&str>) -> NutrilensConfig {
        NutrilensConfig {
            llm: LLMConfig {
                injected_api_key: key.map(str::to_string),
                ..LLMConfig::default()
            },
            storage: StorageConfig {
                data_dir: data_dir.to_path_buf(),
                quota_bytes: None,
            },
        }
    }

    #[test]
    fn service_persists_under_data_dir() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempfile::tempdir()?;
        let service = create_service(&config(temp.path(), None), NotificationBus::new());

        service.store_credential("stored-key")?;
        service.set_theme(ColorTheme::Royal);

        let reopened = create_service(&config(temp.path(), None), NotificationBus::new());
        let credential = reopened.resolve_credential().expect("stored credential");
        assert_eq!(credential.source(), CredentialSource::Stored);
        assert_eq!(reopened.current_theme(), ColorTheme::Royal);
        assert!(temp.path().join("storage.json").exists());
        Ok(())
    }

    #[test]
    fn injected_key_is_passed_through() {
        let temp = tempfile::tempdir().unwrap();
        let service = create_service(&config(temp.path(), Some("env-key")), NotificationBus::new());
        let credential = service.resolve_credential().expect("credential");
        assert_eq!(credential.value(), "env-key");
        assert!(!credential.is_editable());
    }
}
