use std::sync::{Arc, Mutex};

use crate::domain::{
    food_analysis::ports::LLMClient, notification::NotificationBus,
    session::entities::AttemptState, storage::ports::KeyValueStore,
};

/// The single service value every domain service trait is implemented on.
pub struct Service<KV, LLM>
where
    KV: KeyValueStore,
    LLM: LLMClient,
{
    pub(crate) store: Arc<KV>,
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) injected_api_key: Option<String>,
    pub(crate) notifications: NotificationBus,
    pub(crate) attempt_state: Arc<Mutex<AttemptState>>,
}

impl<KV, LLM> Service<KV, LLM>
where
    KV: KeyValueStore,
    LLM: LLMClient,
{
    pub fn new(
        store: KV,
        llm_client: LLM,
        injected_api_key: Option<String>,
        notifications: NotificationBus,
    ) -> Self {
        Self {
            store: Arc::new(store),
            llm_client: Arc::new(llm_client),
            injected_api_key,
            notifications,
            attempt_state: Arc::new(Mutex::new(AttemptState::Idle)),
        }
    }

    pub fn notifications(&self) -> &NotificationBus {
        &self.notifications
    }
}

impl<KV, LLM> Clone for Service<KV, LLM>
where
    KV: KeyValueStore,
    LLM: LLMClient,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            llm_client: Arc::clone(&self.llm_client),
            injected_api_key: self.injected_api_key.clone(),
            notifications: self.notifications.clone(),
            attempt_state: Arc::clone(&self.attempt_state),
        }
    }
}
