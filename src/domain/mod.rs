//! Domain layer for the vault navigation bar.
//!
//! Core types shared by the state machine, storage, and worker, independent of
//! the Zellij runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`entry`]: Vault entry model listed on the home screen
//! - [`sort`]: Sort order options

pub mod entry;
pub mod error;
pub mod sort;

pub use entry::Entry;
pub use error::{Result, VaultBarError};
pub use sort::{SortLabel, SortOption};
