//! Vault entry model as listed on the home screen.
//!
//! Entries carry only what the list needs to display and order them; secret
//! material never leaves the storage layer.

use serde::{Deserialize, Serialize};

/// A credential entry shown in the home screen list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable identifier assigned by storage.
    pub id: String,
    /// Service that issued the credential (e.g. "GitHub").
    pub issuer: String,
    /// Account name within the issuer.
    pub account: String,
    /// Position in the user-defined ("custom") order.
    pub position: u32,
}

impl Entry {
    /// Creates a new entry.
    ///
    /// ```
    /// use vaultbar::Entry;
    ///
    /// let entry = Entry::new("1", "GitHub", "octocat", 0);
    /// assert_eq!(entry.display_name(), "GitHub (octocat)");
    /// ```
    pub fn new(
        id: impl Into<String>,
        issuer: impl Into<String>,
        account: impl Into<String>,
        position: u32,
    ) -> Self {
        Self {
            id: id.into(),
            issuer: issuer.into(),
            account: account.into(),
            position,
        }
    }

    /// Text shown in the list row, also used for search matching.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.account.is_empty() {
            self.issuer.clone()
        } else {
            format!("{} ({})", self.issuer, self.account)
        }
    }
}
