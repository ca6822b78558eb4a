//! Vaultbar: the navigation bar of the Tauthy credential vault, as a Zellij plugin.
//!
//! The bar sits on top of every screen and provides:
//! - A title, or on the home screen an inline search field
//! - Back navigation off the home screen
//! - A sort menu and an overflow menu (lock, settings, about)
//! - Keyboard-triggered search on the home screen
//! - Vault locking through a background worker

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Session (session.rs)                               │  ← Composition root
//! │  - Executes actions, feeds route changes back       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Search mode, menus, keyboard intercept, lock     │
//! │  - Event handling and view model computation        │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - JSON I/O    │   │ - Flag reads  │
//! │ - Hit testing │   │ - Flags       │   │ - Vault lock  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Shared context, navigation, labels, domain types   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a local OTLP file       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: the bar's state machine with its event/action model
//! - [`context`]: shared title, search term and sort option
//! - [`domain`]: entries, sort options, errors
//! - [`i18n`]: label catalog with TOML overrides
//! - [`infrastructure`]: platform paths
//! - [`navigation`]: routes and the router seam
//! - [`session`]: composition root driving one bar
//! - [`storage`]: JSON file persistence and the boolean flag reader
//! - [`ui`]: terminal rendering and click hit-testing
//! - [`worker`]: background worker for storage and locking
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/vaultbar.wasm" {
//!         home_title "Tauthy"
//!         locale_file "~/.config/tauthy/labels.toml"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use vaultbar::{Config, initialize, Event};
//! use vaultbar::app::KeyPress;
//!
//! let mut session = initialize(&Config::default());
//! let update = session.start();
//! assert_eq!(update.worker_messages.len(), 2);
//!
//! // The first key on home opens the search field; later keys type.
//! session.press_key(KeyPress::Printable('g'))?;
//! assert!(session.bar().search_active());
//! session.press_key(KeyPress::Printable('h'))?;
//! assert_eq!(session.context().search_term.get(), "h");
//!
//! session.dispatch(Event::CancelSearch)?;
//! assert!(!session.bar().search_active());
//! # Ok::<(), vaultbar::VaultBarError>(())
//! ```

pub mod app;
pub mod context;
pub mod domain;
pub mod i18n;
pub mod infrastructure;
pub mod navigation;
pub mod session;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppBar, Event};
pub use context::UiContext;
pub use domain::{Entry, Result, SortOption, VaultBarError};
pub use i18n::{Catalog, Translate};
pub use session::{BarSession, Update};

use std::collections::BTreeMap;

/// Default title of the home screen.
pub const DEFAULT_HOME_TITLE: &str = "Tauthy";

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Title shown on the home screen. Default: `"Tauthy"`
    pub home_title: String,

    /// Path to a TOML file of label overrides. `~` is expanded.
    pub locale_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_title: DEFAULT_HOME_TITLE.to_string(),
            locale_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values are treated as absent.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use vaultbar::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("home_title".to_string(), "Codes".to_string());
    /// map.insert("trace_level".to_string(), " ".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.home_title, "Codes");
    /// assert_eq!(config.trace_level, None);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Self {
            home_title: value("home_title").unwrap_or_else(|| DEFAULT_HOME_TITLE.to_string()),
            locale_file: value("locale_file"),
            trace_level: value("trace_level"),
        }
    }
}

/// Builds an unmounted session from `config`.
///
/// A locale file that cannot be loaded is logged and the English labels are
/// used instead.
#[must_use]
pub fn initialize(config: &Config) -> BarSession {
    tracing::debug!("initializing vaultbar plugin");

    let labels = config.locale_file.as_ref().map_or_else(Catalog::english, |file| {
        let path = infrastructure::expand_tilde(file);
        Catalog::with_overrides_from(&path).unwrap_or_else(|e| {
            tracing::warn!(locale_file = %path, error = %e, "failed to load locale overrides, using defaults");
            Catalog::english()
        })
    });

    BarSession::new(config.home_title.clone(), labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_zellij_falls_back_to_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn initialize_applies_locale_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[screen]\nsettings = \"Réglages\"").unwrap();

        let config = Config {
            locale_file: Some(file.path().display().to_string()),
            ..Config::default()
        };
        let mut session = initialize(&config);
        session.start();
        session.dispatch(Event::SelectOverflow(app::OverflowItem::Settings)).unwrap();

        // Overflow menu closed: the selection is ignored.
        assert_eq!(session.context().title.get(), "");

        session.dispatch(Event::OpenOverflowMenu(app::Anchor::new(0, 10))).unwrap();
        session.dispatch(Event::SelectOverflow(app::OverflowItem::Settings)).unwrap();
        assert_eq!(session.context().title.get(), "Réglages");
    }

    #[test]
    fn unreadable_locale_file_uses_english() {
        let config = Config {
            locale_file: Some("/nonexistent/labels.toml".to_string()),
            ..Config::default()
        };
        let session = initialize(&config);
        let vm = session.viewmodel(40);
        assert!(matches!(vm.heading, ui::Heading::Title(ref t) if t == DEFAULT_HOME_TITLE));
    }
}
