//! Settings panel.
//!
//! Four text fields bound to the settings store. Every edit is written
//! through and persisted immediately; there is no validation and no
//! confirmation step.

use crate::config::{Settings, SettingsStore};
use crate::error::{Error, Result};
use crate::host::SettingsPersistence;
use serde::Serialize;
use std::str::FromStr;

/// Panel heading.
pub const PANEL_HEADING: &str = "Credentials";

/// An editable settings field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingKey {
    Username,
    Password,
    NotesWebhookUrl,
    EmbeddingsWebhookUrl,
}

impl SettingKey {
    /// Fields in display order.
    pub const ALL: [Self; 4] = [
        Self::Username,
        Self::Password,
        Self::NotesWebhookUrl,
        Self::EmbeddingsWebhookUrl,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::NotesWebhookUrl => "notes-webhook-url",
            Self::EmbeddingsWebhookUrl => "embeddings-webhook-url",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Password => "Password",
            Self::NotesWebhookUrl => "Notes webhook URL",
            Self::EmbeddingsWebhookUrl => "Embeddings webhook URL",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Username => "Username for authentication",
            Self::Password => "Password for authentication",
            Self::NotesWebhookUrl => "Webhook that receives notes",
            Self::EmbeddingsWebhookUrl => "Webhook that receives PDFs for vectorization",
        }
    }

    #[must_use]
    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::NotesWebhookUrl | Self::EmbeddingsWebhookUrl => "url",
        }
    }

    /// Whether the input hides what is typed.
    #[must_use]
    pub const fn is_masked(&self) -> bool {
        matches!(self, Self::Password)
    }

    fn get<'s>(&self, settings: &'s Settings) -> &'s str {
        match self {
            Self::Username => &settings.credentials.username,
            Self::Password => &settings.credentials.password,
            Self::NotesWebhookUrl => &settings.notes_webhook_url,
            Self::EmbeddingsWebhookUrl => &settings.embeddings_webhook_url,
        }
    }

    fn slot<'s>(&self, settings: &'s mut Settings) -> &'s mut String {
        match self {
            Self::Username => &mut settings.credentials.username,
            Self::Password => &mut settings.credentials.password,
            Self::NotesWebhookUrl => &mut settings.notes_webhook_url,
            Self::EmbeddingsWebhookUrl => &mut settings.embeddings_webhook_url,
        }
    }
}

impl FromStr for SettingKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "username" | "user" => Ok(Self::Username),
            "password" => Ok(Self::Password),
            "notes-webhook-url" | "notes-url" | "notes" => Ok(Self::NotesWebhookUrl),
            "embeddings-webhook-url" | "embeddings-url" | "embeddings" => {
                Ok(Self::EmbeddingsWebhookUrl)
            }
            _ => Err(Error::InvalidArgument(format!("Unknown settings field: {s}"))),
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered field with its current value.
#[derive(Debug, Clone, Serialize)]
pub struct SettingField {
    pub key: SettingKey,
    pub label: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
    pub masked: bool,
    #[serde(skip)]
    pub value: String,
}

impl SettingField {
    /// Value as shown in the input; masked fields show bullets.
    #[must_use]
    pub fn display_value(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Panel bound to the settings store.
pub struct SettingsPanel<'a, P: SettingsPersistence> {
    store: &'a mut SettingsStore<P>,
}

impl<'a, P: SettingsPersistence> SettingsPanel<'a, P> {
    pub fn new(store: &'a mut SettingsStore<P>) -> Self {
        Self { store }
    }

    /// Render the four fields with their current values.
    #[must_use]
    pub fn fields(&self) -> Vec<SettingField> {
        let settings = self.store.settings();
        SettingKey::ALL
            .iter()
            .map(|key| SettingField {
                key: *key,
                label: key.label(),
                description: key.description(),
                placeholder: key.placeholder(),
                masked: key.is_masked(),
                value: key.get(settings).to_string(),
            })
            .collect()
    }

    /// Write one field through to the store and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be saved. The in-memory
    /// value is updated either way.
    pub fn set(&mut self, key: SettingKey, value: impl Into<String>) -> Result<()> {
        *key.slot(self.store.settings_mut()) = value.into();
        self.store.save()
    }
}
