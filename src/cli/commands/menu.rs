//! Menu command implementation.
//!
//! Shows what the file context menu would offer for a file.

use crate::cli::Cli;
use crate::error::Result;
use crate::plugin::{MenuItem, Plugin};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Serialize)]
struct MenuOutput<'a> {
    file: &'a str,
    items: &'a [MenuItem],
}

/// Execute the menu command.
///
/// # Errors
///
/// Returns an error if the file is outside the vault or output fails.
pub fn execute(cli: &Cli, file: &Path, json: bool) -> Result<()> {
    let host = cli.terminal_host()?;
    let file = host.vault_file(file)?;
    let plugin = Plugin::on_activate(Arc::new(host));
    let menu = plugin.file_menu(&file);

    if json {
        let output = MenuOutput {
            file: file.path(),
            items: menu.items(),
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if menu.is_empty() {
        println!("No actions for {file}");
        return Ok(());
    }

    for item in menu.items() {
        println!("{}  ({})", item.title, item.icon);
    }
    Ok(())
}
