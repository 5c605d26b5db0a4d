use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Forest,
    Ocean,
    Royal,
    Crimson,
    Sunset,
    Slate,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 6] = [
        ColorTheme::Forest,
        ColorTheme::Ocean,
        ColorTheme::Royal,
        ColorTheme::Crimson,
        ColorTheme::Sunset,
        ColorTheme::Slate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTheme::Forest => "forest",
            ColorTheme::Ocean => "ocean",
            ColorTheme::Royal => "royal",
            ColorTheme::Crimson => "crimson",
            ColorTheme::Sunset => "sunset",
            ColorTheme::Slate => "slate",
        }
    }

    pub fn accent_color(&self) -> &'static str {
        match self {
            ColorTheme::Forest => "#006110",
            ColorTheme::Ocean => "#0066cc",
            ColorTheme::Royal => "#6b21a8",
            ColorTheme::Crimson => "#dc2626",
            ColorTheme::Sunset => "#ea580c",
            ColorTheme::Slate => "#374151",
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorTheme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownTheme(s.to_string()))
    }
}
