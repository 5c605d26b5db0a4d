use crate::domain::{
    common::services::Service,
    food_analysis::ports::LLMClient,
    storage::ports::KeyValueStore,
    theme::{entities::ColorTheme, ports::ThemeService},
};

pub const THEME_STORAGE_KEY: &str = "nutrilens-color-theme";

impl<KV, LLM> ThemeService for Service<KV, LLM>
where
    KV: KeyValueStore,
    LLM: LLMClient,
{
    fn current_theme(&self) -> ColorTheme {
        match self.store.get_item(THEME_STORAGE_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %value, "unknown stored theme, using default");
                ColorTheme::default()
            }),
            Ok(None) => ColorTheme::default(),
            Err(e) => {
                tracing::error!(error = %e, "failed to read theme");
                ColorTheme::default()
            }
        }
    }

    fn set_theme(&self, theme: ColorTheme) {
        match self.store.set_item(THEME_STORAGE_KEY, theme.as_str()) {
            Ok(()) => tracing::info!(theme = %theme, "theme saved"),
            Err(e) => tracing::error!(error = %e, "failed to save theme"),
        }
    }
}
