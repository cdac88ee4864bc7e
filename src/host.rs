//! Host collaborator contracts.
//!
//! The note-taking host owns file storage, menus, settings persistence,
//! dialogs and notifications. Everything in this crate talks to it through
//! the traits below so the dispatch, prompt and settings logic runs the
//! same against the terminal host and against in-memory test hosts.

use crate::error::Result;
use crate::prompt::NamespacePrompt;
use std::future::Future;
use std::sync::Arc;

/// A file stored in the vault.
///
/// Holds the vault-relative, `/`-separated path. Name, basename and
/// extension are derived from it the way the host reports them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VaultFile {
    path: String,
}

impl VaultFile {
    /// Create a file reference from a vault-relative path.
    ///
    /// Backslashes are normalized to `/` and leading separators dropped.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into().replace('\\', "/");
        Self {
            path: path.trim_start_matches('/').to_string(),
        }
    }

    /// Full vault-relative path, e.g. `repo/nlp/classA/intro.md`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// File name including extension, e.g. `intro.md`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map_or(self.path.as_str(), |(_, name)| name)
    }

    /// File name without its extension, e.g. `intro`.
    #[must_use]
    pub fn basename(&self) -> &str {
        let name = self.name();
        name.rsplit_once('.').map_or(name, |(base, _)| base)
    }

    /// Extension without the dot, or an empty string.
    #[must_use]
    pub fn extension(&self) -> &str {
        self.name().rsplit_once('.').map_or("", |(_, ext)| ext)
    }
}

impl std::fmt::Display for VaultFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

/// Outcome flavor of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A transient user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.into(),
        }
    }
}

/// Read access to vault files.
pub trait Vault: Send + Sync {
    /// Read the full text content of a file.
    fn read_text(&self, file: &VaultFile) -> impl Future<Output = Result<String>> + Send;

    /// Read the raw bytes of a file.
    fn read_binary(&self, file: &VaultFile) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Fire-and-forget notification surface.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Modal dialog surface.
///
/// `open` takes ownership of the prompt and must return without waiting
/// for the user. The host later calls [`NamespacePrompt::confirm`] or
/// [`NamespacePrompt::dismiss`] (or simply drops the prompt).
pub trait PromptSurface: Send + Sync {
    fn open(&self, prompt: NamespacePrompt);
}

/// Opaque key-value storage for the settings blob.
pub trait SettingsPersistence: Send + Sync {
    /// Load the persisted blob. `Ok(None)` when nothing was saved yet.
    fn load_persisted(&self) -> Result<Option<serde_json::Value>>;

    /// Overwrite the persisted blob.
    fn save_persisted(&self, data: &serde_json::Value) -> Result<()>;
}

/// Everything the plugin needs from its host.
pub trait Host: Vault + Notifier + PromptSurface + SettingsPersistence {}

impl<T: Vault + Notifier + PromptSurface + SettingsPersistence> Host for T {}

impl<T: SettingsPersistence + ?Sized> SettingsPersistence for Arc<T> {
    fn load_persisted(&self) -> Result<Option<serde_json::Value>> {
        (**self).load_persisted()
    }

    fn save_persisted(&self, data: &serde_json::Value) -> Result<()> {
        (**self).save_persisted(data)
    }
}
