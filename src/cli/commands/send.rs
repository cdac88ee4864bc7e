//! Send command implementation.
//!
//! Activates the plugin against the terminal host and clicks the menu
//! action contributed for the file.

use crate::cli::{Cli, PromptAnswer, SendArgs};
use crate::dispatch::DispatchOutcome;
use crate::error::{Error, Result};
use crate::plugin::{MenuAction, Plugin};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct SendOutput<'a> {
    file: &'a str,
    action: MenuAction,
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute the send command.
///
/// # Errors
///
/// Returns an error if the file type is unsupported, or if reading,
/// delivery or the webhook failed. A dismissed prompt is not an error.
pub fn execute(cli: &Cli, args: &SendArgs, json: bool) -> Result<()> {
    let answer = match (&args.namespace, args.yes) {
        (Some(namespace), _) => PromptAnswer::Namespace(namespace.clone()),
        (None, true) => PromptAnswer::AcceptDefault,
        (None, false) => PromptAnswer::Interactive,
    };

    let host = cli.terminal_host()?.with_prompt_answer(answer);
    let file = host.vault_file(&args.file)?;
    let plugin = Plugin::on_activate(Arc::new(host));

    let action = plugin
        .file_menu(&file)
        .items()
        .first()
        .map(|item| item.action)
        .ok_or_else(|| Error::UnsupportedFile {
            path: file.path().to_string(),
        })?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;
    let outcome = rt.block_on(plugin.run(action, &file));

    if json {
        let error = match &outcome {
            DispatchOutcome::Failed(e) => Some(e.to_string()),
            DispatchOutcome::Sent | DispatchOutcome::Cancelled => None,
        };
        let output = SendOutput {
            file: file.path(),
            action,
            status: outcome.label(),
            error,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if matches!(outcome, DispatchOutcome::Cancelled) && !cli.quiet {
        println!("Cancelled, nothing was sent.");
    }

    plugin.on_deactivate();
    outcome.into_result()
}
