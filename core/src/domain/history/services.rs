use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::{entities::AnalysisResult, ports::LLMClient},
    history::{
        entities::{HistoryCommit, HistoryEntry},
        ports::HistoryService,
    },
    storage::ports::KeyValueStore,
};

pub const HISTORY_STORAGE_KEY: &str = "nutrilens_history";
pub const MAX_HISTORY_ENTRIES: usize = 20;

impl<KV, LLM> Service<KV, LLM>
where
    KV: KeyValueStore,
    LLM: LLMClient,
{
    fn load_history(&self) -> Vec<HistoryEntry> {
        let raw = match self.store.get_item(HISTORY_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "failed to read history");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored history is corrupt, treating as empty");
            Vec::new()
        })
    }

    fn save_history(&self, entries: &[HistoryEntry]) -> Result<(), CoreError> {
        let serialized = serde_json::to_string(entries)
            .map_err(|e| CoreError::StorageUnavailable(e.to_string()))?;
        self.store.set_item(HISTORY_STORAGE_KEY, &serialized)
    }
}

impl<KV, LLM> HistoryService for Service<KV, LLM>
where
    KV: KeyValueStore,
    LLM: LLMClient,
{
    fn list_history(&self) -> Vec<HistoryEntry> {
        self.load_history()
    }

    fn get_history_entry(&self, id: &str) -> Option<HistoryEntry> {
        self.load_history().into_iter().find(|entry| entry.id == id)
    }

    fn add_to_history(&self, result: AnalysisResult, image_data: &str) -> HistoryEntry {
        self.commit_to_history(result, image_data).entry
    }

    #[instrument(skip_all)]
    fn commit_to_history(&self, result: AnalysisResult, image_data: &str) -> HistoryCommit {
        let entry = HistoryEntry::new(result, image_data);

        let mut entries = self.load_history();
        entries.insert(0, entry.clone());
        entries.truncate(MAX_HISTORY_ENTRIES);

        let durable = self.save_history(&entries);
        match &durable {
            Ok(()) => tracing::info!(id = %entry.id, size = entries.len(), "history entry saved"),
            Err(e) => tracing::error!(error = %e, id = %entry.id, "failed to save history"),
        }

        HistoryCommit { entry, durable }
    }

    #[instrument(skip(self))]
    fn remove_history_entry(&self, id: &str) {
        let mut entries = self.load_history();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            tracing::debug!("no history entry with this id");
            return;
        }

        if let Err(e) = self.save_history(&entries) {
            tracing::error!(error = %e, "failed to update history");
        }
    }

    fn clear_history(&self) {
        match self.store.remove_item(HISTORY_STORAGE_KEY) {
            Ok(()) => tracing::info!("history cleared"),
            Err(e) => tracing::error!(error = %e, "failed to clear history"),
        }
    }
}
