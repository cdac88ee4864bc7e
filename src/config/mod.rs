//! Configuration management.
//!
//! This module holds the plugin settings (webhook credentials and URLs),
//! the store that loads and saves them through the host, and a JSON file
//! backend used by the terminal host.
//!
//! # Persisted format
//!
//! ```json
//! {
//!   "credentials": { "username": "", "password": "" },
//!   "notesWebhookUrl": "",
//!   "embeddingsWebhookUrl": ""
//! }
//! ```
//!
//! Loading merges persisted values over the defaults key by key, nested
//! keys included. Nothing is validated: a bad URL or empty credentials only
//! show up as a failed request at send time.

mod file;

pub use file::{default_config_path, JsonFileStorage};

use crate::error::Result;
use crate::host::SettingsPersistence;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Basic-Auth credentials for both webhooks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Plugin settings. Defaults are all empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub credentials: Credentials,
    pub notes_webhook_url: String,
    pub embeddings_webhook_url: String,
}

impl Settings {
    /// Merge a persisted blob over the defaults.
    ///
    /// Persisted values win per top-level and nested key. `null` values are
    /// skipped and unknown keys ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a recognized key holds a value of the wrong type.
    pub fn merged_over_defaults(persisted: Value) -> Result<Self> {
        let mut base = serde_json::to_value(Self::default())?;
        merge_json(&mut base, persisted);
        Ok(serde_json::from_value(base)?)
    }
}

/// Recursively overlay `overlay` onto `base`.
fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                if value.is_null() {
                    continue;
                }
                let nested = value.is_object() && base_map.get(&key).is_some_and(Value::is_object);
                if nested {
                    if let Some(existing) = base_map.get_mut(&key) {
                        merge_json(existing, value);
                    }
                } else {
                    base_map.insert(key, value);
                }
            }
        }
        (base, overlay) if !overlay.is_null() => *base = overlay,
        _ => {}
    }
}

/// Process settings, loaded once and saved after every edit.
///
/// Owned by the plugin and handed by reference to the settings panel;
/// dispatches read a snapshot.
pub struct SettingsStore<P: SettingsPersistence> {
    persistence: Arc<P>,
    settings: Settings,
}

impl<P: SettingsPersistence> SettingsStore<P> {
    /// Load persisted settings merged over the defaults.
    ///
    /// Never fails: missing, unreadable or malformed data yields defaults.
    pub fn load(persistence: Arc<P>) -> Self {
        let settings = match persistence.load_persisted() {
            Ok(Some(data)) => Settings::merged_over_defaults(data).unwrap_or_else(|e| {
                warn!("Ignoring persisted settings: {e}");
                Settings::default()
            }),
            Ok(None) => {
                debug!("No persisted settings, using defaults");
                Settings::default()
            }
            Err(e) => {
                warn!("Could not load settings: {e}");
                Settings::default()
            }
        };

        Self {
            persistence,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Persist the current settings, overwriting what was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot store the data.
    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_value(&self.settings)?;
        self.persistence.save_persisted(&data)?;
        debug!("Settings saved");
        Ok(())
    }
}
