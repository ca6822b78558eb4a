//! Storage layer for vault preferences, lock state, and entries.
//!
//! Only the worker thread touches storage. The bar itself sees storage through
//! two narrow doors: the password-set flag (via [`FlagReader`]) and the lock
//! operation's outcome (via worker responses).
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `flags`: boolean preference lookup with defaults
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod flags;
pub mod json;
pub mod models;

pub use backend::Storage;
pub use flags::{FlagReader, IS_PASSWORD_SET};
pub use json::JsonStorage;
pub use models::{EntryRecord, VaultRecord};
