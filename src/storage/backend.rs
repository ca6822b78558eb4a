//! Storage backend abstraction.
//!
//! The trait is minimal: each method maps directly to something the worker
//! thread does on behalf of the bar.

use crate::domain::error::Result;
use crate::storage::models::{EntryRecord, VaultRecord};

/// Abstraction over persistent storage backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use vaultbar::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let storage = JsonStorage::new(PathBuf::from("/tmp/vault.json"))?;
/// let entries = storage.get_entries()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Storage: Send {
    /// Reads a raw preference value.
    ///
    /// Returns `Ok(None)` if the key was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn read_preference(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Writes a preference value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn write_preference(&mut self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Retrieves all entries in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get_entries(&self) -> Result<Vec<EntryRecord>>;

    /// Adds an entry, or replaces the entry with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be persisted.
    fn upsert_entry(&mut self, entry: &EntryRecord) -> Result<()>;

    /// Locks the vault at `timestamp`.
    ///
    /// Locking an already locked vault succeeds and keeps the original
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`VaultBarError::Lock`](crate::VaultBarError::Lock) if no master
    /// password is set, or a storage error if the state cannot be persisted.
    fn lock_vault(&mut self, timestamp: i64) -> Result<()>;

    /// Current lock state.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn vault_state(&self) -> Result<VaultRecord>;
}
