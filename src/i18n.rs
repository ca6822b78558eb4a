//! Localized labels.
//!
//! The bar only ever asks for a label by key. [`Catalog`] ships English
//! defaults and can be overlaid with a TOML file whose tables mirror the key
//! prefixes:
//!
//! ```toml
//! [appBar]
//! lock = "Verrouiller"
//! settings = "Paramètres"
//!
//! [screen]
//! settings = "Paramètres"
//! ```
//!
//! Unknown keys translate to themselves so a missing label is visible rather
//! than blank.

use crate::domain::{Result, VaultBarError};
use std::collections::HashMap;
use std::path::Path;

/// Label lookup consumed by the view model.
pub trait Translate {
    /// Returns the label for `key`.
    fn translate(&self, key: &str) -> String;
}

const DEFAULTS: &[(&str, &str)] = &[
    ("appBar.lock", "Lock"),
    ("appBar.settings", "Settings"),
    ("appBar.about", "About"),
    ("appBar.custom", "Custom"),
    ("appBar.search", "Search"),
    ("screen.settings", "Settings"),
    ("screen.about", "About"),
    ("screen.unlock", "Unlock"),
    ("list.empty", "No entries"),
    ("list.noMatches", "No matching entries"),
];

/// Key-to-label table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    labels: HashMap<String, String>,
}

impl Catalog {
    /// Catalog holding the built-in English labels.
    #[must_use]
    pub fn english() -> Self {
        Self {
            labels: DEFAULTS
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// English labels overlaid with the overrides in `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultBarError::Io`] if the file cannot be read and
    /// [`VaultBarError::Locale`] if it is not a table of strings.
    pub fn with_overrides_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let mut catalog = Self::english();
        catalog.merge_toml(&contents)?;
        tracing::debug!(path = %path.as_ref().display(), labels = catalog.len(), "locale overrides loaded");
        Ok(catalog)
    }

    /// Overlays the labels of a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`VaultBarError::Locale`] on parse errors or non-string values.
    pub fn merge_toml(&mut self, contents: &str) -> Result<()> {
        let table: toml::Table = toml::from_str(contents)
            .map_err(|e| VaultBarError::Locale(format!("invalid locale file: {e}")))?;
        flatten("", &table, &mut self.labels)
    }

    /// Number of known labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the catalog has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str) -> String {
        self.labels.get(key).cloned().unwrap_or_else(|| {
            tracing::trace!(key, "missing label");
            key.to_string()
        })
    }
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut HashMap<String, String>) -> Result<()> {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            toml::Value::String(label) => {
                out.insert(key, label.clone());
            }
            toml::Value::Table(nested) => flatten(&key, nested, out)?,
            other => {
                return Err(VaultBarError::Locale(format!(
                    "label '{key}' must be a string, found {}",
                    other.type_str()
                )));
            }
        }
    }
    Ok(())
}
