//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the vaultbar library and Zellij: it maps
//! Zellij events onto the session, posts worker requests, and hosts the
//! worker thread.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← BarSession, input mapping
//! │  └──────────────────┘   │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │   WorkerHost     │   │  ← VaultWorker: flags, entries, lock
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! With a menu open:
//! - `Up`/`Down`: Move highlight
//! - `Enter`: Select highlighted item
//! - `Esc`: Close menu
//!
//! On home, menu open or not:
//! - Any character: Start search (typed once the field is shown)
//! - `Esc`: Cancel search
//!
//! Anywhere:
//! - `Backspace`: Delete from the search term
//! - `Ctrl+s`: Sort menu
//! - `Ctrl+o`: Overflow menu
//! - `Ctrl+b`: Back

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use vaultbar::app::menu::MenuKind;
use vaultbar::app::{KeyPress, SearchEdit};
use vaultbar::worker::{VaultWorker, WorkerMessage, WorkerResponse};
use vaultbar::{BarSession, Config, Event as BarEvent, Update};

const WORKER_NAME: &str = "vaultbar";

register_plugin!(State);
register_worker!(WorkerHost, vaultbar_worker, VAULTBAR_WORKER);

static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Worker thread entry: decodes requests and answers the plugin.
#[derive(Default, Serialize, Deserialize)]
struct WorkerHost(VaultWorker);

impl ZellijWorker<'_> for WorkerHost {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            vaultbar::observability::init_tracing(&Config::default());
        }

        if let Some(payload) = self.0.respond(&payload) {
            post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            });
        }
    }
}

/// Plugin state wrapper.
struct State {
    session: BarSession,
    /// Last known pane width, for keyboard-opened menus.
    cols: usize,
    /// Initial loads held until permissions are granted.
    pending: Vec<WorkerMessage>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            session: vaultbar::initialize(&Config::default()),
            cols: 80,
            pending: Vec::new(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        vaultbar::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(home_title = %config.home_title, "parsed configuration");

        self.session = vaultbar::initialize(&config);
        self.pending = self.session.start().worker_messages;

        request_permission(&[PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);
        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let result = match event {
            Event::Key(ref key) => self.handle_key(key),
            Event::Mouse(Mouse::LeftClick(line, column)) => match usize::try_from(line) {
                Ok(line) => self.session.click(line, column, self.cols),
                Err(_) => return false,
            },
            Event::CustomMessage(message, payload) => match Self::map_custom_message_event(&message, &payload) {
                Some(event) => self.session.dispatch(event),
                None => return false,
            },
            Event::PermissionRequestResult(status) => {
                self.handle_permission_result(status);
                return false;
            }
            _ => return false,
        };

        match result {
            Ok(update) => Self::apply(update),
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.cols = cols;
        print!("{}", self.session.render_frame(rows, cols));
    }
}

impl State {
    fn handle_key(&mut self, key: &KeyWithModifier) -> vaultbar::Result<Update> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('s') => self.session.open_menu(MenuKind::Sort, self.cols),
                BareKey::Char('o') => self.session.open_menu(MenuKind::Overflow, self.cols),
                BareKey::Char('b') => self.session.dispatch(BarEvent::Back),
                _ => Ok(Update::default()),
            };
        }

        let menu_open = self.session.bar().menus().focused().is_some();
        match key.bare_key {
            BareKey::Up if menu_open => self.session.dispatch(BarEvent::MenuCursor { down: false }),
            BareKey::Down if menu_open => self.session.dispatch(BarEvent::MenuCursor { down: true }),
            BareKey::Backspace => self.session.dispatch(BarEvent::SearchEdit(SearchEdit::Backspace)),
            BareKey::Esc => self.session.press_key(KeyPress::Cancel),
            BareKey::Enter => self.session.press_key(KeyPress::Printable('\n')),
            BareKey::Char(c) => self.session.press_key(KeyPress::Printable(c)),
            _ => Ok(Update::default()),
        }
    }

    fn apply(update: Update) -> bool {
        for message in &update.worker_messages {
            Self::post_worker_message(message);
        }
        update.render
    }

    fn handle_permission_result(&mut self, status: PermissionStatus) {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - loading preferences and entries");
                for message in std::mem::take(&mut self.pending) {
                    Self::post_worker_message(&message);
                }
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - vault storage unavailable");
            }
        }
    }

    fn get_event_name(event: &Event) -> String {
        match event {
            Event::Key(key) => format!("Key({:?})", key.bare_key),
            Event::Mouse(_) => "Mouse".to_string(),
            Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<BarEvent> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }
        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(response = ?response, "worker response received");
                Some(BarEvent::WorkerResponse(response))
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker message");
            }
        }
    }
}
