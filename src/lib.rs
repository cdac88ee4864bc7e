//! Vault Relay - forward vault files to automation webhooks
//!
//! Right-click a note or PDF in a vault and send it to one of two external
//! webhooks: Markdown text to a notes endpoint (e.g. summarization), PDF
//! bytes to an embeddings endpoint (e.g. vectorization). Both are posted
//! with Basic authentication after the user confirms a namespace.
//!
//! # Architecture
//!
//! - [`host`] - Contracts the note-taking host provides (vault, prompt, notices, storage)
//! - [`config`] - Settings, the settings store and a JSON file backend
//! - [`prompt`] - Namespace prompt with a single-resolution answer future
//! - [`dispatch`] - Routing, payloads and the webhook dispatcher
//! - [`panel`] - Settings panel bound to the store
//! - [`plugin`] - Entry point: activation and file-menu contributions
//! - [`cli`] - Command-line interface and the terminal host
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod panel;
pub mod plugin;
pub mod prompt;

pub use error::{Error, Result};
