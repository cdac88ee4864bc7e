//! Tests for the `relay` binary.
//!
//! Stdout is not a terminal under the test harness, so every command
//! answers in JSON.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A vault with one note and one PDF, plus a settings file path.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let vault = dir.path().join("vault");
        fs::create_dir_all(vault.join("repo/nlp/classA")).unwrap();
        fs::write(vault.join("repo/nlp/classA/intro.md"), "# Intro").unwrap();
        fs::write(vault.join("repo/nlp/paper.pdf"), b"%PDF-1.7 test").unwrap();
        fs::write(vault.join("repo/nlp/image.png"), b"png").unwrap();
        Self { dir }
    }

    fn vault(&self) -> std::path::PathBuf {
        self.dir.path().join("vault")
    }

    fn config(&self) -> std::path::PathBuf {
        self.dir.path().join("settings").join("config.json")
    }

    fn write_settings(&self, settings: &Value) {
        fs::create_dir_all(self.config().parent().unwrap()).unwrap();
        fs::write(self.config(), serde_json::to_string(settings).unwrap()).unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("relay").unwrap();
        cmd.env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config())
            .arg("--vault")
            .arg(self.vault());
        cmd
    }
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).unwrap()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_set_persists_and_show_masks_password() {
    let fx = Fixture::new();

    fx.cmd().args(["config", "set", "username", "alice"]).assert().success();
    fx.cmd().args(["config", "set", "password", "s3cret"]).assert().success();

    let saved: Value = serde_json::from_str(&fs::read_to_string(fx.config()).unwrap()).unwrap();
    assert_eq!(saved["credentials"]["username"], "alice");
    assert_eq!(saved["credentials"]["password"], "s3cret");
    assert_eq!(saved["notesWebhookUrl"], "");

    let output = fx.cmd().args(["config", "show"]).output().unwrap();
    assert!(output.status.success());
    let fields = stdout_json(&output.stdout);
    assert_eq!(fields[0]["field"], "username");
    assert_eq!(fields[0]["value"], "alice");
    assert_eq!(fields[1]["field"], "password");
    assert_eq!(fields[1]["value"], "••••••");
}

#[test]
fn test_config_set_unknown_field_fails() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["config", "set", "token", "x"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("INVALID_ARGUMENT"));

    assert!(!fx.config().exists());
}

#[test]
fn test_config_path_reports_location() {
    let fx = Fixture::new();

    let output = fx.cmd().args(["config", "path"]).output().unwrap();
    let value = stdout_json(&output.stdout);
    assert_eq!(value["path"], arg(&fx.config()));
    assert_eq!(value["exists"], false);
}

#[test]
fn test_malformed_settings_fall_back_to_defaults() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.config().parent().unwrap()).unwrap();
    fs::write(fx.config(), "{broken").unwrap();

    let output = fx.cmd().args(["config", "show"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output.stdout)[0]["value"], "");
}

// ============================================================================
// Menu
// ============================================================================

#[test]
fn test_menu_lists_contributed_actions() {
    let fx = Fixture::new();

    let output = fx.cmd().arg("menu").arg("repo/nlp/classA/intro.md").output().unwrap();
    let value = stdout_json(&output.stdout);
    assert_eq!(value["file"], "repo/nlp/classA/intro.md");
    assert_eq!(value["items"], json!([{
        "title": "Generate enhanced note",
        "icon": "sparkles",
        "action": "generate-note"
    }]));

    let output = fx.cmd().arg("menu").arg(fx.vault().join("repo/nlp/paper.pdf")).output().unwrap();
    assert_eq!(stdout_json(&output.stdout)["items"][0]["action"], "vectorize");

    let output = fx.cmd().arg("menu").arg("repo/nlp/image.png").output().unwrap();
    assert_eq!(stdout_json(&output.stdout)["items"], json!([]));
}

// ============================================================================
// Send
// ============================================================================

#[test]
fn test_send_unsupported_file_fails() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["send", "--yes", "repo/nlp/image.png"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("UNSUPPORTED_FILE"));
}

#[test]
fn test_send_missing_file_reports_read_failure() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["send", "--yes", "repo/nlp/missing.md"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Could not read missing.md."));
}

#[test]
fn test_send_to_unreachable_webhook_reports_network_failure() {
    let fx = Fixture::new();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    fx.write_settings(&json!({"notesWebhookUrl": format!("http://{addr}/notes")}));

    let output = fx.cmd().args(["send", "--yes", "repo/nlp/classA/intro.md"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(stdout_json(&output.stdout)["status"], "failed");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Network error while sending the note.").count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_note_with_namespace_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .and(header("Authorization", "Basic YWxpY2U6czNjcmV0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let fx = Fixture::new();
    fx.write_settings(&json!({
        "credentials": {"username": "alice", "password": "s3cret"},
        "notesWebhookUrl": format!("{}/notes", server.uri())
    }));

    let output = fx
        .cmd()
        .args(["send", "--namespace", "research", "repo/nlp/classA/intro.md"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value = stdout_json(&output.stdout);
    assert_eq!(value["status"], "sent");
    assert_eq!(value["action"], "generate-note");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["baseDir"], "research");
    assert_eq!(body["filePath"], "repo/nlp/classA/intro.md");
    assert_eq!(body["content"], "# Intro");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_document_reads_namespace_from_stdin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let fx = Fixture::new();
    fx.write_settings(&json!({"embeddingsWebhookUrl": format!("{}/embeddings", server.uri())}));

    fx.cmd()
        .args(["send", "repo/nlp/paper.pdf"])
        .write_stdin("vision\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Namespace [nlp]"));

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("filename=\"paper.pdf\""));
    assert!(body.contains("vision"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_cancelled_on_end_of_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let fx = Fixture::new();
    fx.write_settings(&json!({"notesWebhookUrl": format!("{}/notes", server.uri())}));

    let output = fx
        .cmd()
        .args(["send", "repo/nlp/classA/intro.md"])
        .write_stdin("")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output.stdout)["status"], "cancelled");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_rejected_by_webhook() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let fx = Fixture::new();
    fx.write_settings(&json!({"embeddingsWebhookUrl": format!("{}/embeddings", server.uri())}));

    let output = fx.cmd().args(["send", "-y", "repo/nlp/paper.pdf"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to send the PDF."));
    assert!(stderr.contains("HTTP_STATUS_ERROR"));
}
