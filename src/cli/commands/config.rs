//! Config command implementation.
//!
//! Renders and edits the settings panel.

use crate::cli::{Cli, ConfigCommands};
use crate::error::Result;
use crate::panel::{SettingKey, PANEL_HEADING};
use crate::plugin::Plugin;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Serialize)]
struct FieldOutput {
    field: SettingKey,
    label: &'static str,
    value: String,
}

#[derive(Serialize)]
struct PathOutput<'a> {
    path: &'a Path,
    exists: bool,
}

/// Execute a config subcommand.
///
/// # Errors
///
/// Returns an error if the field name is unknown or settings cannot be saved.
pub fn execute(cli: &Cli, command: &ConfigCommands, json: bool) -> Result<()> {
    let host = cli.terminal_host()?;

    if let ConfigCommands::Path = command {
        let path = host.settings_path().to_path_buf();
        if json {
            let output = PathOutput {
                path: &path,
                exists: path.exists(),
            };
            println!("{}", serde_json::to_string(&output)?);
        } else {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let mut plugin = Plugin::on_activate(Arc::new(host));
    let mut panel = plugin.settings_panel();

    match command {
        ConfigCommands::Set { field, value } => {
            let key: SettingKey = field.parse()?;
            panel.set(key, value.as_str())?;
            if json {
                println!("{}", serde_json::json!({ "field": key, "updated": true }));
            } else if !cli.quiet {
                println!("Updated {}", key.label());
            }
        }
        ConfigCommands::Show => {
            let fields: Vec<FieldOutput> = panel
                .fields()
                .into_iter()
                .map(|f| FieldOutput {
                    field: f.key,
                    label: f.label,
                    value: f.display_value(),
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string(&fields)?);
            } else {
                println!("{}", PANEL_HEADING.bold());
                for field in fields {
                    let value = if field.value.is_empty() {
                        "(not set)".dimmed().to_string()
                    } else {
                        field.value
                    };
                    println!("  {:<24} {value}", field.label);
                }
            }
        }
        ConfigCommands::Path => {}
    }

    Ok(())
}
