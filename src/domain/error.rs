//! Error types for the vault navigation bar.
//!
//! This module defines the centralized error type [`VaultBarError`] and a type
//! alias [`Result`] used across the crate. Nothing in the bar is fatal: handler
//! errors are logged by the plugin shim, and lock failures become diagnostics.

use thiserror::Error;

/// The main error type for vaultbar operations.
///
/// Most variants carry a description; I/O failures convert automatically via
/// `#[from]`.
///
/// # Examples
///
/// ```
/// use vaultbar::VaultBarError;
///
/// fn lock_without_password() -> Result<(), VaultBarError> {
///     Err(VaultBarError::Lock("no master password is set".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum VaultBarError {
    /// Storage operation failed.
    ///
    /// Reading or writing the vault file failed, or its contents are invalid.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The vault lock operation was rejected or could not complete.
    #[error("Lock error: {0}")]
    Lock(String),

    /// A locale override file could not be read or parsed.
    #[error("Locale error: {0}")]
    Locale(String),
}

/// A specialized `Result` type for vaultbar operations.
pub type Result<T> = std::result::Result<T, VaultBarError>;
