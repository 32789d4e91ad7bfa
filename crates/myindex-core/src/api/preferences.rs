//! Profile and preference methods on MyIndexApi.

use crate::models::{Preferences, Theme};
use crate::profile::SiteProfile;
use crate::store::GlobalState;
use crate::{MyIndexApi, Result};

impl MyIndexApi {
    // ========================================
    // Profile & Preferences
    // ========================================

    /// Get the read-only site profile.
    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    pub async fn preferences(&self) -> Preferences {
        self.store.preferences().await
    }

    /// Flip between light and dark; returns the new theme.
    pub async fn toggle_theme(&self) -> Result<Theme> {
        let theme = self.store.toggle_theme().await?;
        tracing::debug!("Theme set to {}", theme);
        Ok(theme)
    }

    /// Set `lang` verbatim, or flip `zh`/`en` when none is given.
    pub async fn toggle_lang(&self, lang: Option<&str>) -> Result<String> {
        let lang = self.store.toggle_lang(lang).await?;
        tracing::debug!("Language set to {}", lang);
        Ok(lang)
    }

    /// Snapshot of the whole global store.
    pub async fn state(&self) -> GlobalState {
        self.store.snapshot().await
    }
}
