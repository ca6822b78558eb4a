//! Storage record models for the persistence layer.
//!
//! Records are kept separate from domain models so the file format can carry
//! bookkeeping fields the bar never sees.

use crate::domain::Entry;
use serde::{Deserialize, Serialize};

/// A vault entry as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Stable identifier.
    pub id: String,

    /// Service that issued the credential.
    pub issuer: String,

    /// Account name within the issuer.
    #[serde(default)]
    pub account: String,

    /// Position in the user-defined order.
    pub position: u32,

    /// Unix timestamp when the entry was added.
    pub created_at: i64,
}

impl EntryRecord {
    /// Creates a record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use vaultbar::storage::EntryRecord;
    ///
    /// let record = EntryRecord::new("1", "GitHub", "octocat", 0);
    /// assert!(record.created_at > 0);
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
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

impl From<EntryRecord> for Entry {
    fn from(record: EntryRecord) -> Self {
        Self::new(record.id, record.issuer, record.account, record.position)
    }
}

/// Lock state of the vault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultRecord {
    /// Whether the vault is locked.
    pub locked: bool,

    /// Unix timestamp of the most recent lock, `None` if never locked.
    pub locked_at: Option<i64>,
}
