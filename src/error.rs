//! Error types for Vault Relay.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=read, 3=delivery, 4=validation, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Vault Relay operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Vault (exit 2)
    ReadError,

    // Delivery (exit 3)
    HttpStatusError,
    NetworkError,

    // Validation (exit 4)
    InvalidArgument,
    UnsupportedFile,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::ReadError => "READ_ERROR",
            Self::HttpStatusError => "HTTP_STATUS_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::UnsupportedFile => "UNSUPPORTED_FILE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::ReadError => 2,
            Self::HttpStatusError | Self::NetworkError => 3,
            Self::InvalidArgument | Self::UnsupportedFile => 4,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether repeating the same action could succeed.
    ///
    /// Delivery failures depend on the remote side; everything else
    /// needs a change of input or configuration first.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::HttpStatusError | Self::NetworkError)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in Vault Relay operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Webhook rejected the request (HTTP {status})")]
    HttpStatus { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unsupported file type: {path}")]
    UnsupportedFile { path: String },

    #[error("File is outside the vault: {path}")]
    OutsideVault { path: PathBuf, vault: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::ReadError,
            Self::HttpStatus { .. } => ErrorCode::HttpStatusError,
            Self::Network(_) => ErrorCode::NetworkError,
            Self::UnsupportedFile { .. } => ErrorCode::UnsupportedFile,
            Self::OutsideVault { .. } | Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::HttpStatus { status: 401 | 403 } => Some(
                "Check the stored credentials: relay config set username <name> \
                 and relay config set password <secret>"
                    .to_string(),
            ),
            Self::HttpStatus { status: 404 } => Some(
                "Check the webhook URLs with `relay config show`.".to_string(),
            ),
            Self::Network(_) => Some(
                "Make sure the webhook URL is set and reachable. \
                 Use `relay config show` to inspect it."
                    .to_string(),
            ),
            Self::UnsupportedFile { .. } => {
                Some("Only Markdown (.md) and PDF (.pdf) files can be sent.".to_string())
            }
            Self::OutsideVault { vault, .. } => Some(format!(
                "Pass a file under {} or point --vault at the right directory.",
                vault.display()
            )),
            Self::InvalidArgument(msg) if msg.contains("field") => Some(
                "Valid fields: username, password, notes-webhook-url, embeddings-webhook-url"
                    .to_string(),
            ),
            Self::Read { .. }
            | Self::HttpStatus { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::InvalidArgument(_)
            | Self::Config(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
