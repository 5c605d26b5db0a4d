use crate::domain::theme::entities::ColorTheme;

pub trait ThemeService: Send + Sync {
    /// Missing or unrecognized stored values fall back to the default theme.
    fn current_theme(&self) -> ColorTheme;

    fn set_theme(&self, theme: ColorTheme);
}
