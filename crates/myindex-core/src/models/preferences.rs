//! User preference types.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LANG: &str = "zh";
pub const ALTERNATE_LANG: &str = "en";

/// Color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language and theme, persisted across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default)]
    pub theme: Theme,
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            theme: Theme::default(),
        }
    }
}

impl Preferences {
    /// Flip between light and dark.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Set `lang` verbatim, or flip `zh`/`en` when no (or an empty) code is given.
    pub fn toggle_lang(&mut self, lang: Option<&str>) -> &str {
        self.lang = match lang.filter(|l| !l.is_empty()) {
            Some(lang) => lang.to_string(),
            None if self.lang == DEFAULT_LANG => ALTERNATE_LANG.to_string(),
            None => DEFAULT_LANG.to_string(),
        };
        &self.lang
    }
}
