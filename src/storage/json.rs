//! JSON file-based storage backend.
//!
//! The whole file is kept in memory and rewritten on every change using an
//! atomic write (write-to-temp + rename), so a crash never leaves a
//! half-written vault file behind.

use crate::domain::error::{Result, VaultBarError};
use crate::storage::backend::Storage;
use crate::storage::flags::{FlagReader, IS_PASSWORD_SET};
use crate::storage::models::{EntryRecord, VaultRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

/// JSON storage container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Preference key/value pairs, such as `isPasswordSet`.
    #[serde(default)]
    preferences: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    vault: VaultRecord,

    /// Entries in stored order.
    #[serde(default)]
    entries: Vec<EntryRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            preferences: BTreeMap::new(),
            vault: VaultRecord::default(),
            entries: Vec::new(),
        }
    }
}

/// JSON file storage backend.
///
/// `Send` but not `Sync`: it lives on the worker thread only.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "preferences": { "isPasswordSet": true },
///   "vault": { "locked": false, "locked_at": null },
///   "entries": [
///     { "id": "1", "issuer": "GitHub", "account": "octocat", "position": 0, "created_at": 1700000000 }
///   ]
/// }
/// ```
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
    dirty: bool,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// Existing files are loaded; otherwise storage starts empty and nothing
    /// is written until the first change. Parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or the file
    /// exists but cannot be read or is not valid vault JSON.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(
            entry_count = data.entries.len(),
            preference_count = data.preferences.len(),
            locked = data.vault.locked,
            "storage initialized"
        );

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| VaultBarError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > FORMAT_VERSION {
            return Err(VaultBarError::Storage(format!(
                "unsupported vault file version {} (newest known is {FORMAT_VERSION})",
                data.version
            )));
        }
        Ok(data)
    }

    /// Writes pending changes to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write, or the rename
    /// fails. The in-memory state is kept and stays dirty.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| VaultBarError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "storage saved");
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.dirty = true;
        self.flush()
    }
}

impl Storage for JsonStorage {
    fn read_preference(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.data.preferences.get(key).cloned())
    }

    fn write_preference(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        let _span = tracing::debug_span!("json_write_preference", key = %key).entered();
        if self.data.preferences.get(key) == Some(&value) {
            return Ok(());
        }
        self.data.preferences.insert(key.to_string(), value);
        self.commit()
    }

    fn get_entries(&self) -> Result<Vec<EntryRecord>> {
        let _span = tracing::debug_span!("json_get_entries").entered();
        let entries = self.data.entries.clone();
        tracing::debug!(count = entries.len(), "retrieved entries");
        Ok(entries)
    }

    fn upsert_entry(&mut self, entry: &EntryRecord) -> Result<()> {
        let _span = tracing::debug_span!("json_upsert_entry", entry_id = %entry.id).entered();
        if let Some(existing) = self.data.entries.iter_mut().find(|e| e.id == entry.id) {
            existing.clone_from(entry);
        } else {
            self.data.entries.push(entry.clone());
        }
        self.commit()
    }

    fn lock_vault(&mut self, timestamp: i64) -> Result<()> {
        let _span = tracing::debug_span!("json_lock_vault", timestamp).entered();

        if !self.read_boolean(IS_PASSWORD_SET, false) {
            return Err(VaultBarError::Lock("no master password is set".to_string()));
        }
        if self.data.vault.locked {
            tracing::debug!(locked_at = ?self.data.vault.locked_at, "vault already locked");
            return Ok(());
        }

        let previous = self.data.vault;
        self.data.vault = VaultRecord {
            locked: true,
            locked_at: Some(timestamp),
        };
        if let Err(e) = self.commit() {
            // A vault that could not be persisted as locked is not locked.
            self.data.vault = previous;
            self.dirty = false;
            return Err(e);
        }
        tracing::info!("vault locked");
        Ok(())
    }

    fn vault_state(&self) -> Result<VaultRecord> {
        Ok(self.data.vault)
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.flush() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn storage_in(dir: &tempfile::TempDir) -> JsonStorage {
        JsonStorage::new(dir.path().join("data").join("vault.json")).unwrap()
    }

    #[test]
    fn missing_file_starts_empty_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        assert!(storage.get_entries().unwrap().is_empty());
        assert!(!storage.read_boolean(IS_PASSWORD_SET, false));
        drop(storage);
        assert!(!dir.path().join("data").join("vault.json").exists());
    }

    #[test]
    fn preferences_and_entries_persist() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut storage = storage_in(&dir);
            storage.write_preference(IS_PASSWORD_SET, json!(true)).unwrap();
            storage.upsert_entry(&EntryRecord::new("1", "GitHub", "octocat", 0)).unwrap();
            storage.upsert_entry(&EntryRecord::new("1", "GitHub", "hubot", 0)).unwrap();
        }

        let storage = storage_in(&dir);
        assert!(storage.read_boolean(IS_PASSWORD_SET, false));
        let entries = storage.get_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].account, "hubot");
    }

    #[test]
    fn lock_requires_password() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = storage_in(&dir);
        let err = storage.lock_vault(100).unwrap_err();
        assert!(matches!(err, VaultBarError::Lock(_)));
        assert!(!storage.vault_state().unwrap().locked);
    }

    #[test]
    fn lock_is_idempotent_and_keeps_first_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = storage_in(&dir);
        storage.write_preference(IS_PASSWORD_SET, json!(true)).unwrap();

        storage.lock_vault(100).unwrap();
        storage.lock_vault(200).unwrap();
        drop(storage);

        let state = storage_in(&dir).vault_state().unwrap();
        assert_eq!(state, VaultRecord { locked: true, locked_at: Some(100) });
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonStorage::new(path), Err(VaultBarError::Storage(_))));
    }

    #[test]
    fn newer_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.json");
        std::fs::write(&path, r#"{"version": 9}"#).unwrap();
        assert!(matches!(JsonStorage::new(path), Err(VaultBarError::Storage(_))));
    }
}
