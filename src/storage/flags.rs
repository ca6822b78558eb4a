//! Boolean preference lookup.
//!
//! Preferences may have been written by other frontends as JSON booleans or as
//! their string form (`"true"`). Anything else, a missing key, or a read error
//! yields the caller's default.

use crate::storage::Storage;
use serde_json::Value;

/// Key of the "a master password is set" flag.
pub const IS_PASSWORD_SET: &str = "isPasswordSet";

/// Read-only access to boolean flags.
pub trait FlagReader {
    /// Reads `key` as a boolean, falling back to `default`.
    fn read_boolean(&self, key: &str, default: bool) -> bool;
}

impl<S: Storage + ?Sized> FlagReader for S {
    fn read_boolean(&self, key: &str, default: bool) -> bool {
        match self.read_preference(key) {
            Ok(Some(Value::Bool(flag))) => flag,
            Ok(Some(Value::String(text))) => match text.as_str() {
                "true" => true,
                "false" => false,
                _ => {
                    tracing::warn!(key, value = %text, "flag is not a boolean, using default");
                    default
                }
            },
            Ok(Some(other)) => {
                tracing::warn!(key, value = %other, "flag is not a boolean, using default");
                default
            }
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read flag, using default");
                default
            }
        }
    }
}
