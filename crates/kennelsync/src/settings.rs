//! Typed access to the store's settings table.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use kennelsync_core::models::{Preferences, PREFERENCES_KEY};
use kennelsync_core::storage::{decode_value, encode_value, KeyValueStore, Result};

/// Key to JSON value settings. Values are not validated against any shape.
#[derive(Clone)]
pub struct Settings {
    store: Arc<dyn KeyValueStore>,
}

impl Settings {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Reads a setting, `None` if it was never written.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get_setting(key).await? {
            Some(raw) => decode_value(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Writes a setting, replacing any previous value.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = encode_value(value)?;
        self.store.set_setting(key, &raw).await?;
        tracing::debug!(key = %key, "Setting saved");
        Ok(())
    }

    /// Loads preferences, falling back to defaults when none are saved.
    pub async fn load_preferences(&self) -> Result<Preferences> {
        Ok(self.get(PREFERENCES_KEY).await?.unwrap_or_default())
    }

    pub async fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.set(PREFERENCES_KEY, preferences).await
    }
}
