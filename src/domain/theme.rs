use std::str::FromStr;

use strum::{Display, EnumString, IntoStaticStr};

/// Preference key under which the theme is persisted.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Resolve a persisted value. Anything other than `"dark"` means light.
    pub fn from_preference(value: Option<&str>) -> Self {
        value
            .and_then(|v| Theme::from_str(v).ok())
            .unwrap_or_default()
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
