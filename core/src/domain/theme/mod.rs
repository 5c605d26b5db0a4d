pub mod entities;
pub mod ports;
pub mod services;

pub use entities::ColorTheme;
pub use ports::ThemeService;
