//! Request bodies and headers for the two webhooks.

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::host::VaultFile;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use super::routing::Route;

/// MIME type of the document part.
pub const PDF_MIME: &str = "application/pdf";

/// JSON body posted to the notes webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePayload {
    pub file_name: String,
    pub file_path: String,
    pub dir_path: String,
    pub content: String,
    pub title: String,
    /// The namespace the user confirmed, not the derived default.
    pub base_dir: String,
}

impl NotePayload {
    #[must_use]
    pub fn new(file: &VaultFile, route: &Route, content: String, namespace: String) -> Self {
        Self {
            file_name: file.name().to_string(),
            file_path: route.file_path.clone(),
            dir_path: route.dir_path.clone(),
            content,
            title: file.basename().to_string(),
            base_dir: namespace,
        }
    }
}

/// `Authorization` header value: `Basic base64(username:password)`.
///
/// The password may itself contain `:`; only the first colon separates
/// the two on the receiving side, so nothing is escaped.
#[must_use]
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.username, credentials.password);
    format!("Basic {}", STANDARD.encode(raw))
}

/// Multipart body posted to the embeddings webhook.
///
/// # Errors
///
/// Returns an error if the document part cannot be built.
pub fn document_form(file: &VaultFile, bytes: Vec<u8>, namespace: String) -> Result<Form> {
    let part = Part::bytes(bytes)
        .file_name(file.name().to_string())
        .mime_str(PDF_MIME)
        .map_err(|e| Error::Other(format!("Failed to build document part: {e}")))?;

    Ok(Form::new().part("file", part).text("baseDir", namespace))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_basic_auth_known_value() {
        assert_eq!(basic_auth_header(&creds("alice", "s3cret")), "Basic YWxpY2U6czNjcmV0");
    }

    #[test]
    fn test_basic_auth_keeps_colons_in_password() {
        let header = basic_auth_header(&creds("bob", "pa:ss:word"));
        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, "bob:pa:ss:word");
    }

    #[test]
    fn test_basic_auth_with_empty_credentials() {
        // base64(":")
        assert_eq!(basic_auth_header(&Credentials::default()), "Basic Og==");
    }

    #[test]
    fn test_note_payload_uses_confirmed_namespace() {
        let file = VaultFile::new("vault/nlp/classA/intro.md");
        let route = Route::for_file(&file);
        let payload = NotePayload::new(&file, &route, "# Intro".into(), "research".into());

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["fileName"], "intro.md");
        assert_eq!(value["filePath"], "vault/nlp/classA/intro.md");
        assert_eq!(value["dirPath"], "nlp/classA");
        assert_eq!(value["content"], "# Intro");
        assert_eq!(value["title"], "intro");
        assert_eq!(value["baseDir"], "research");
        assert_eq!(value.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_document_form_builds() {
        let file = VaultFile::new("vault/papers/attention.pdf");
        let form = document_form(&file, b"%PDF-1.7".to_vec(), "papers".into()).unwrap();
        assert!(!form.boundary().is_empty());
    }
}
