//! Namespace prompt.
//!
//! A small modal asking the user to confirm or edit the namespace a file is
//! sent under. The prompt owns a one-shot completion callback: confirming
//! invokes it exactly once with the current draft, dismissing never does.
//!
//! [`NamespacePrompt::with_pending`] pairs a prompt with a
//! [`PendingNamespace`] future so an async flow can suspend until the user
//! answers. Dropping the prompt without confirming resolves the future to
//! `None`, so a dismissed dialog never leaves a caller waiting.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tracing::debug;

type OnSubmit = Box<dyn FnOnce(String) + Send>;

/// Placeholder shown in the empty text field.
pub const NAMESPACE_PLACEHOLDER: &str = "namespace";

/// Label of the submit button.
pub const SUBMIT_LABEL: &str = "Send";

/// Editable namespace dialog.
pub struct NamespacePrompt {
    title: String,
    description: String,
    namespace: String,
    on_submit: OnSubmit,
}

impl NamespacePrompt {
    /// Create a prompt seeded with `initial`.
    pub fn new(
        initial: impl Into<String>,
        on_submit: impl FnOnce(String) + Send + 'static,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            namespace: initial.into(),
            on_submit: Box::new(on_submit),
        }
    }

    /// Create a prompt whose answer is delivered through a future.
    pub fn with_pending(
        initial: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> (Self, PendingNamespace) {
        let (tx, rx) = oneshot::channel();
        let prompt = Self::new(
            initial,
            move |namespace| {
                // Receiver gone means the caller stopped waiting.
                let _ = tx.send(namespace);
            },
            title,
            description,
        );
        (prompt, PendingNamespace { rx })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current draft value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.namespace
    }

    /// Replace the draft. Called on every edit, no validation.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.namespace = value.into();
    }

    /// Close the dialog and hand the draft to the completion callback.
    pub fn confirm(self) {
        debug!(title = %self.title, namespace = %self.namespace, "Namespace confirmed");
        (self.on_submit)(self.namespace);
    }

    /// Close the dialog without submitting.
    pub fn dismiss(self) {
        debug!(title = %self.title, "Namespace prompt dismissed");
    }
}

impl fmt::Debug for NamespacePrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespacePrompt")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

/// Resolves to the confirmed namespace, or `None` once the prompt is
/// dismissed or dropped.
#[derive(Debug)]
pub struct PendingNamespace {
    rx: oneshot::Receiver<String>,
}

impl Future for PendingNamespace {
    type Output = Option<String>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(Result::ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_prompt(initial: &str) -> (NamespacePrompt, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let prompt = NamespacePrompt::new(
            initial,
            move |ns| sink.lock().unwrap().push(ns),
            "Title",
            "Description",
        );
        (prompt, calls)
    }

    #[test]
    fn test_confirm_invokes_callback_once_with_draft() {
        let (mut prompt, calls) = recording_prompt("nlp");
        prompt.set_value("n");
        prompt.set_value("nl");
        prompt.set_value("research");
        prompt.confirm();

        assert_eq!(*calls.lock().unwrap(), vec!["research".to_string()]);
    }

    #[test]
    fn test_confirm_without_edits_submits_initial_value() {
        let (prompt, calls) = recording_prompt("nlp");
        assert_eq!(prompt.value(), "nlp");
        prompt.confirm();

        assert_eq!(*calls.lock().unwrap(), vec!["nlp".to_string()]);
    }

    #[test]
    fn test_dismiss_never_invokes_callback() {
        let (mut prompt, calls) = recording_prompt("nlp");
        prompt.set_value("other");
        prompt.dismiss();

        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_accepts_empty_value() {
        let (mut prompt, calls) = recording_prompt("nlp");
        prompt.set_value("");
        prompt.confirm();

        assert_eq!(*calls.lock().unwrap(), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_pending_resolves_on_confirm() {
        let (mut prompt, pending) = NamespacePrompt::with_pending("nlp", "T", "D");
        prompt.set_value("vision");
        prompt.confirm();

        assert_eq!(pending.await, Some("vision".to_string()));
    }

    #[tokio::test]
    async fn test_pending_resolves_none_on_dismiss() {
        let (prompt, pending) = NamespacePrompt::with_pending("nlp", "T", "D");
        prompt.dismiss();

        assert_eq!(pending.await, None);
    }

    #[tokio::test]
    async fn test_pending_resolves_none_when_dropped() {
        let (prompt, pending) = NamespacePrompt::with_pending("nlp", "T", "D");
        drop(prompt);

        assert_eq!(pending.await, None);
    }

    #[tokio::test]
    async fn test_pending_waits_for_confirmation_from_another_task() {
        let (prompt, pending) = NamespacePrompt::with_pending("nlp", "T", "D");
        let handle = tokio::spawn(async move {
            tokio::task::yield_now().await;
            prompt.confirm();
        });

        assert_eq!(pending.await, Some("nlp".to_string()));
        handle.await.unwrap();
    }
}
