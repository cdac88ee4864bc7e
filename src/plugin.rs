//! Plugin entry point.
//!
//! The host activates the plugin once, asks it for file-menu contributions
//! whenever a file's context menu is built, and runs the chosen action.
//! Markdown files get "Generate enhanced note", PDFs get "Vectorize",
//! everything else gets nothing.

use crate::config::{Settings, SettingsStore};
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::host::{Host, VaultFile};
use crate::panel::SettingsPanel;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// What a menu item does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuAction {
    /// Send the note to the notes webhook.
    GenerateNote,
    /// Send the PDF to the embeddings webhook.
    Vectorize,
}

/// A contributed context-menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub title: &'static str,
    pub icon: &'static str,
    pub action: MenuAction,
}

/// Context-menu builder passed to the plugin.
#[derive(Debug, Default)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The activated plugin.
pub struct Plugin<H: Host> {
    host: Arc<H>,
    store: SettingsStore<H>,
    client: reqwest::Client,
}

impl<H: Host> Plugin<H> {
    /// Load settings and register the settings panel.
    pub fn on_activate(host: Arc<H>) -> Self {
        let store = SettingsStore::load(Arc::clone(&host));
        info!("Vault relay activated");
        Self {
            host,
            store,
            client: reqwest::Client::new(),
        }
    }

    /// Nothing to release; the host drops registered handlers itself.
    pub fn on_deactivate(self) {
        debug!("Vault relay deactivated");
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    /// The registered settings panel.
    pub fn settings_panel(&mut self) -> SettingsPanel<'_, H> {
        SettingsPanel::new(&mut self.store)
    }

    /// File-menu handler: contribute items for `file`.
    pub fn on_file_menu(&self, menu: &mut Menu, file: &VaultFile) {
        match file.extension() {
            "md" => menu.add_item(MenuItem {
                title: "Generate enhanced note",
                icon: "sparkles",
                action: MenuAction::GenerateNote,
            }),
            "pdf" => menu.add_item(MenuItem {
                title: "Vectorize",
                icon: "database-zap",
                action: MenuAction::Vectorize,
            }),
            _ => {}
        }
    }

    /// Build a fresh menu for `file`.
    #[must_use]
    pub fn file_menu(&self, file: &VaultFile) -> Menu {
        let mut menu = Menu::new();
        self.on_file_menu(&mut menu, file);
        menu
    }

    /// Run a clicked menu action.
    pub async fn run(&self, action: MenuAction, file: &VaultFile) -> DispatchOutcome {
        let settings = self.store.settings().clone();
        let dispatcher = Dispatcher::with_client(self.host.as_ref(), self.client.clone());
        match action {
            MenuAction::GenerateNote => dispatcher.send_note(&settings, file).await,
            MenuAction::Vectorize => dispatcher.send_document(&settings, file).await,
        }
    }
}
