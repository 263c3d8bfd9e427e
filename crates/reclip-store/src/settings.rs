//! User settings and the first-run onboarding flag.

use std::sync::Arc;

use tracing::warn;

use reclip_models::UserSettings;

use crate::backend::StorageBackend;
use crate::error::StorageResult;

/// Storage key holding [`UserSettings`] as a JSON object.
pub const SETTINGS_KEY: &str = "reclip_settings";

/// Storage key holding the literal string `"true"` once onboarding is done.
pub const ONBOARDING_KEY: &str = "reclip_onboarding_complete";

/// Settings are read rarely and written rarely, so this store keeps no
/// in-memory copy; every call goes to the backend.
pub struct SettingsStore {
    backend: Arc<dyn StorageBackend>,
}

impl SettingsStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Loads settings, falling back to defaults when the key is missing
    /// or the payload does not parse.
    pub async fn load(&self) -> UserSettings {
        match self.backend.get(SETTINGS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(error = %e, "Corrupt settings, using defaults");
                    UserSettings::default()
                }
            },
            Ok(None) => UserSettings::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read settings, using defaults");
                UserSettings::default()
            }
        }
    }

    pub async fn save(&self, settings: &UserSettings) -> StorageResult<()> {
        let raw = serde_json::to_string(settings)?;
        self.backend.set(SETTINGS_KEY, &raw).await
    }

    /// Loads, applies `mutate`, saves, and returns the new settings.
    pub async fn update<F>(&self, mutate: F) -> StorageResult<UserSettings>
    where
        F: FnOnce(&mut UserSettings),
    {
        let mut settings = self.load().await;
        mutate(&mut settings);
        self.save(&settings).await?;
        Ok(settings)
    }

    /// Whether the user has been through first-run onboarding.
    ///
    /// Anything other than the exact string `"true"` counts as not done.
    pub async fn has_completed_onboarding(&self) -> bool {
        matches!(
            self.backend.get(ONBOARDING_KEY).await,
            Ok(Some(value)) if value == "true"
        )
    }

    pub async fn complete_onboarding(&self) -> StorageResult<()> {
        self.backend.set(ONBOARDING_KEY, "true").await
    }

    /// Clears the flag so onboarding shows again on next launch.
    pub async fn reset_onboarding(&self) -> StorageResult<()> {
        self.backend.remove(ONBOARDING_KEY).await
    }
}
