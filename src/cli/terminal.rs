//! Terminal host.
//!
//! Plays the note-taking host from a shell:
//! - **Vault**: files under a root directory, addressed by `/`-separated
//!   vault-relative paths
//! - **Prompt**: answered from flags or read from stdin
//! - **Notices**: colored lines on stderr
//! - **Settings**: a JSON file

use crate::config::JsonFileStorage;
use crate::error::{Error, Result};
use crate::host::{Notice, NoticeKind, Notifier, PromptSurface, SettingsPersistence, Vault, VaultFile};
use crate::prompt::NamespacePrompt;
use colored::Colorize;
use serde_json::Value;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

/// How the namespace prompt gets answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PromptAnswer {
    /// Ask on the terminal. An empty line keeps the suggestion, end of
    /// input dismisses.
    #[default]
    Interactive,
    /// Confirm the suggested namespace.
    AcceptDefault,
    /// Replace the suggestion and confirm.
    Namespace(String),
}

/// Host backed by the local filesystem and the terminal.
#[derive(Debug)]
pub struct TerminalHost {
    vault_root: PathBuf,
    storage: JsonFileStorage,
    answer: PromptAnswer,
    quiet: bool,
}

impl TerminalHost {
    pub fn new(vault_root: impl Into<PathBuf>, storage: JsonFileStorage) -> Self {
        Self {
            vault_root: vault_root.into(),
            storage,
            answer: PromptAnswer::default(),
            quiet: false,
        }
    }

    #[must_use]
    pub fn with_prompt_answer(mut self, answer: PromptAnswer) -> Self {
        self.answer = answer;
        self
    }

    /// Suppress success notices.
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub fn vault_root(&self) -> &Path {
        &self.vault_root
    }

    #[must_use]
    pub fn settings_path(&self) -> &Path {
        self.storage.path()
    }

    /// Turn a command-line path into a vault file reference.
    ///
    /// Existing files are resolved and must lie under the vault root.
    /// A relative path that does not exist is taken as vault-relative so
    /// the send reports it as unreadable.
    ///
    /// # Errors
    ///
    /// Returns an error if the path escapes the vault or names no file.
    pub fn vault_file(&self, path: &Path) -> Result<VaultFile> {
        let root = std::fs::canonicalize(&self.vault_root).unwrap_or_else(|_| self.vault_root.clone());

        let relative = match std::fs::canonicalize(path) {
            Ok(full) => full
                .strip_prefix(&root)
                .map(Path::to_path_buf)
                .map_err(|_| Error::OutsideVault {
                    path: full.clone(),
                    vault: root.clone(),
                })?,
            Err(_) if path.is_relative() => path.to_path_buf(),
            Err(_) => path
                .strip_prefix(&root)
                .map(Path::to_path_buf)
                .map_err(|_| Error::OutsideVault {
                    path: path.to_path_buf(),
                    vault: root.clone(),
                })?,
        };

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => {
                    return Err(Error::OutsideVault {
                        path: path.to_path_buf(),
                        vault: root,
                    });
                }
            }
        }

        if segments.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "Not a file: {}",
                path.display()
            )));
        }

        Ok(VaultFile::new(segments.join("/")))
    }

    fn resolve(&self, file: &VaultFile) -> PathBuf {
        file.path()
            .split('/')
            .fold(self.vault_root.clone(), |acc, segment| acc.join(segment))
    }
}

fn read_error(file: &VaultFile, e: &std::io::Error) -> Error {
    Error::Read {
        path: file.path().to_string(),
        message: e.to_string(),
    }
}

impl Vault for TerminalHost {
    async fn read_text(&self, file: &VaultFile) -> Result<String> {
        tokio::fs::read_to_string(self.resolve(file))
            .await
            .map_err(|e| read_error(file, &e))
    }

    async fn read_binary(&self, file: &VaultFile) -> Result<Vec<u8>> {
        tokio::fs::read(self.resolve(file))
            .await
            .map_err(|e| read_error(file, &e))
    }
}

impl Notifier for TerminalHost {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => {
                if !self.quiet {
                    eprintln!("{} {}", "✓".green(), notice.message);
                }
            }
            NoticeKind::Failure => eprintln!("{} {}", "✗".red(), notice.message.red()),
        }
    }
}

impl PromptSurface for TerminalHost {
    fn open(&self, mut prompt: NamespacePrompt) {
        match &self.answer {
            PromptAnswer::Namespace(namespace) => {
                prompt.set_value(namespace.clone());
                prompt.confirm();
            }
            PromptAnswer::AcceptDefault => prompt.confirm(),
            PromptAnswer::Interactive => match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(ask_on_terminal(prompt));
                }
                Err(_) => {
                    warn!("No async runtime for the namespace prompt");
                    prompt.dismiss();
                }
            },
        }
    }
}

async fn ask_on_terminal(mut prompt: NamespacePrompt) {
    eprintln!("{}", prompt.title().bold());
    eprintln!("{}", prompt.description().dimmed());
    eprint!("Namespace [{}]: ", prompt.value());
    let _ = std::io::stderr().flush();

    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    match reader.read_line(&mut line).await {
        Ok(0) => {
            eprintln!();
            prompt.dismiss();
        }
        Ok(_) => {
            let value = line.trim();
            if !value.is_empty() {
                prompt.set_value(value);
            }
            prompt.confirm();
        }
        Err(e) => {
            warn!("Could not read namespace: {e}");
            prompt.dismiss();
        }
    }
}

impl SettingsPersistence for TerminalHost {
    fn load_persisted(&self) -> Result<Option<Value>> {
        self.storage.load_persisted()
    }

    fn save_persisted(&self, data: &Value) -> Result<()> {
        self.storage.save_persisted(data)
    }
}
