//! Webhook dispatch.
//!
//! Forwards a vault file to one of the two configured webhooks:
//! - **Notes** (`send_note`) - Markdown text as a JSON document
//! - **Documents** (`send_document`) - PDF bytes as a multipart upload
//!
//! # Flow
//!
//! ```text
//! read file ──▶ derive route ──▶ namespace prompt ──▶ POST ──▶ notice
//!     │                                │
//!     ▼                                ▼
//!  notice (read failure)          cancelled: nothing sent
//! ```
//!
//! Every send makes at most one HTTP attempt and ends with exactly one
//! notice, except a dismissed prompt which sends and reports nothing.
//! Failures never escape as errors; they come back as a
//! [`DispatchOutcome::Failed`] after the notice was shown.
//!
//! Sends share no mutable state. Each borrows the host and works on its own
//! settings snapshot, so concurrent sends on different files need no locking.

mod payload;
mod routing;

pub use payload::{basic_auth_header, document_form, NotePayload, PDF_MIME};
pub use routing::{default_namespace, derive_dir_path, Route};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::host::{Host, Notice, VaultFile};
use crate::prompt::NamespacePrompt;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, error, info, warn};

/// Result of one send.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The webhook answered with a success status.
    Sent,
    /// The user dismissed the namespace prompt.
    Cancelled,
    /// Reading, sending or the webhook failed. A notice was already shown.
    Failed(Error),
}

impl DispatchOutcome {
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Short status label for machine output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Cancelled => "cancelled",
            Self::Failed(_) => "failed",
        }
    }

    /// Treat a dismissed prompt as success; failures become errors.
    ///
    /// # Errors
    ///
    /// Returns the failure carried by [`DispatchOutcome::Failed`].
    pub fn into_result(self) -> Result<()> {
        match self {
            Self::Sent | Self::Cancelled => Ok(()),
            Self::Failed(e) => Err(e),
        }
    }
}

/// Prompt wording for one kind of send.
struct PromptText {
    title: &'static str,
    description: &'static str,
}

/// Notice wording for one kind of send.
struct Messages {
    sent: &'static str,
    rejected: &'static str,
    network: &'static str,
}

const NOTE_PROMPT: PromptText = PromptText {
    title: "Configure search namespace",
    description: "Namespace where information related to this note will be searched",
};

const DOCUMENT_PROMPT: PromptText = PromptText {
    title: "Configure namespace (vector index)",
    description: "Namespace where the PDF will be stored in the vector index",
};

const NOTE_MESSAGES: Messages = Messages {
    sent: "Note sent successfully.",
    rejected: "Failed to send the note.",
    network: "Network error while sending the note.",
};

const DOCUMENT_MESSAGES: Messages = Messages {
    sent: "PDF sent for vectorization.",
    rejected: "Failed to send the PDF.",
    network: "Network error while sending the PDF.",
};

/// Sends vault files to the configured webhooks.
pub struct Dispatcher<'a, H: Host> {
    host: &'a H,
    client: reqwest::Client,
}

impl<'a, H: Host> Dispatcher<'a, H> {
    /// Create a dispatcher with a fresh HTTP client.
    pub fn new(host: &'a H) -> Self {
        Self::with_client(host, reqwest::Client::new())
    }

    /// Create a dispatcher sharing an existing HTTP client.
    pub fn with_client(host: &'a H, client: reqwest::Client) -> Self {
        Self { host, client }
    }

    /// Send a Markdown note's text to the notes webhook.
    pub async fn send_note(&self, settings: &Settings, file: &VaultFile) -> DispatchOutcome {
        let content = match self.host.read_text(file).await {
            Ok(content) => content,
            Err(e) => return self.read_failed(file, e),
        };

        let route = Route::for_file(file);
        let Some(namespace) = self.ask_namespace(&route, &NOTE_PROMPT).await else {
            return DispatchOutcome::Cancelled;
        };

        let payload = NotePayload::new(file, &route, content, namespace);
        debug!(file = %file, namespace = %payload.base_dir, "Sending note");
        let result = self.post_note(settings, &payload).await;
        self.report(file, result, &NOTE_MESSAGES)
    }

    /// Send a PDF's bytes to the embeddings webhook.
    ///
    /// The file is read once up front so an unreadable file fails before
    /// the prompt opens, then read again after confirmation so edits made
    /// while the prompt was open are included.
    pub async fn send_document(&self, settings: &Settings, file: &VaultFile) -> DispatchOutcome {
        if let Err(e) = self.host.read_binary(file).await {
            return self.read_failed(file, e);
        }

        let route = Route::for_file(file);
        let Some(namespace) = self.ask_namespace(&route, &DOCUMENT_PROMPT).await else {
            return DispatchOutcome::Cancelled;
        };

        let bytes = match self.host.read_binary(file).await {
            Ok(bytes) => bytes,
            Err(e) => return self.read_failed(file, e),
        };

        debug!(file = %file, namespace = %namespace, bytes = bytes.len(), "Sending document");
        let result = self.post_document(settings, file, bytes, namespace).await;
        self.report(file, result, &DOCUMENT_MESSAGES)
    }

    /// Open the namespace prompt and wait for the user's answer.
    async fn ask_namespace(&self, route: &Route, text: &PromptText) -> Option<String> {
        let (prompt, pending) =
            NamespacePrompt::with_pending(route.default_namespace.as_str(), text.title, text.description);
        self.host.open(prompt);

        let answer = pending.await;
        if answer.is_none() {
            debug!(file = %route.file_path, "Send cancelled at namespace prompt");
        }
        answer
    }

    async fn post_note(&self, settings: &Settings, payload: &NotePayload) -> Result<()> {
        let body = serde_json::to_string(payload)?;

        let response = self
            .client
            .post(&settings.notes_webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, basic_auth_header(&settings.credentials))
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Notes webhook request failed: {e}")))?;

        check_status(response.status())
    }

    async fn post_document(
        &self,
        settings: &Settings,
        file: &VaultFile,
        bytes: Vec<u8>,
        namespace: String,
    ) -> Result<()> {
        let form = document_form(file, bytes, namespace)?;

        let response = self
            .client
            .post(&settings.embeddings_webhook_url)
            .header(AUTHORIZATION, basic_auth_header(&settings.credentials))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Embeddings webhook request failed: {e}")))?;

        check_status(response.status())
    }

    /// Turn a send result into a notice and an outcome.
    fn report(&self, file: &VaultFile, result: Result<()>, messages: &Messages) -> DispatchOutcome {
        match result {
            Ok(()) => {
                info!(file = %file, "Webhook accepted file");
                self.host.notify(Notice::success(messages.sent));
                DispatchOutcome::Sent
            }
            Err(e @ Error::Network(_)) => {
                error!(file = %file, "{e}");
                self.host.notify(Notice::failure(messages.network));
                DispatchOutcome::Failed(e)
            }
            Err(e) => {
                warn!(file = %file, "{e}");
                self.host.notify(Notice::failure(messages.rejected));
                DispatchOutcome::Failed(e)
            }
        }
    }

    fn read_failed(&self, file: &VaultFile, e: Error) -> DispatchOutcome {
        let e = match e {
            Error::Read { .. } => e,
            other => Error::Read {
                path: file.path().to_string(),
                message: other.to_string(),
            },
        };
        warn!("{e}");
        self.host.notify(Notice::failure(format!("Could not read {}.", file.name())));
        DispatchOutcome::Failed(e)
    }
}

fn check_status(status: reqwest::StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::HttpStatus {
            status: status.as_u16(),
        })
    }
}
