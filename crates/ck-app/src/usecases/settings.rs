//! Use case for reading and updating history settings

use std::sync::Arc;

use ck_core::ports::KeyValueStorePort;
use ck_core::Settings;
use tracing::{error, info, warn};

use crate::repo;

/// Settings are defaulted lazily: the first load of a store that has none
/// writes the defaults back.
#[derive(Clone)]
pub struct SettingsStore {
    store: Arc<dyn KeyValueStorePort>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    /// Never fails; unreadable settings yield the defaults.
    pub async fn load(&self) -> Settings {
        match repo::load_settings(self.store.as_ref()).await {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                let settings = Settings::default();
                if let Err(e) = repo::persist_settings(self.store.as_ref(), &settings).await {
                    warn!(error = %e, "failed to persist default settings");
                }
                settings
            }
            Err(e) => {
                error!(error = %e, "failed to load settings, using defaults");
                Settings::default()
            }
        }
    }

    #[tracing::instrument(name = "usecase.settings.update", skip(self))]
    pub async fn update(&self, settings: Settings) -> bool {
        if let Err(e) = settings.validate() {
            warn!(error = %e, "rejecting invalid settings");
            return false;
        }
        match repo::persist_settings(self.store.as_ref(), &settings).await {
            Ok(()) => {
                info!("settings updated");
                true
            }
            Err(e) => {
                error!(error = %e, "failed to persist settings");
                false
            }
        }
    }
}
