//! Worker-side message processing.
//!
//! The worker owns storage. Each request is decoded from JSON, handled, and
//! answered with exactly one [`WorkerResponse`]; the plugin binary wires
//! [`VaultWorker::respond`] to Zellij's worker interface.

use crate::domain::error::{Result, VaultBarError};
use crate::domain::Entry;
use crate::infrastructure::paths;
use crate::storage::{FlagReader, JsonStorage, Storage, IS_PASSWORD_SET};
use crate::worker::{WorkerMessage, WorkerResponse};
use crate::app::lock::LockTicket;
use serde::{Deserialize, Serialize};

/// File name of the vault inside the data directory.
pub const VAULT_FILE: &str = "vault.json";

/// Worker thread state.
///
/// Storage is opened lazily on the first message, so a worker that is never
/// used never touches the filesystem.
#[derive(Serialize, Deserialize, Default)]
pub struct VaultWorker {
    #[serde(skip)]
    storage: Option<Box<dyn Storage>>,
}

impl VaultWorker {
    /// Creates a worker over an already opened backend.
    #[must_use]
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    /// Opens the JSON vault in the plugin data directory if not open yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the vault file exists but cannot be loaded.
    pub fn ensure_storage(&mut self) -> Result<()> {
        if self.storage.is_none() {
            let path = paths::get_data_dir().join(VAULT_FILE);
            self.storage = Some(Box::new(JsonStorage::new(path)?));
        }
        Ok(())
    }

    fn get_storage(&mut self) -> Result<&mut Box<dyn Storage>> {
        self.storage
            .as_mut()
            .ok_or_else(|| VaultBarError::Worker("Storage not initialized".to_string()))
    }

    fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_preferences(&mut self) -> WorkerResponse {
        Self::handle_db_result(
            "load preferences",
            self.get_storage()
                .map(|storage| storage.read_boolean(IS_PASSWORD_SET, false)),
            |password_set| WorkerResponse::PreferencesLoaded { password_set },
        )
    }

    fn handle_load_entries(&mut self) -> WorkerResponse {
        Self::handle_db_result(
            "load entries",
            self.get_storage().and_then(|storage| storage.get_entries()),
            |records| {
                let entries: Vec<Entry> = records.into_iter().map(Entry::from).collect();
                tracing::debug!(entry_count = entries.len(), "entries loaded from storage");
                WorkerResponse::EntriesLoaded { entries }
            },
        )
    }

    /// Locks the vault. Failures are answered with `LockFailed`, never
    /// retried. A vault that is already locked is answered without a write.
    fn handle_lock_vault(&mut self, ticket: LockTicket) -> WorkerResponse {
        let timestamp = chrono::Utc::now().timestamp();
        let result = self.get_storage().and_then(|storage| {
            let state = storage.vault_state()?;
            if state.locked {
                tracing::debug!(?ticket, locked_at = ?state.locked_at, "vault already locked");
                return Ok(());
            }
            storage.lock_vault(timestamp)?;
            tracing::debug!(?ticket, timestamp, "vault lock stored");
            Ok(())
        });
        match result {
            Ok(()) => WorkerResponse::VaultLocked { ticket },
            Err(e) => {
                tracing::error!(?ticket, error = %e, "vault lock failed");
                WorkerResponse::LockFailed {
                    ticket,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Rebuilds the plugin thread's span context so worker spans join its
    /// trace. The guard must outlive the handling span.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );
        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }

    /// Processes one request.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadPreferences { .. } => self.handle_load_preferences(),
            WorkerMessage::LoadEntries { .. } => self.handle_load_entries(),
            WorkerMessage::LockVault { ticket, .. } => self.handle_lock_vault(ticket),
        }
    }

    /// Decodes `payload`, handles it, and encodes the response.
    ///
    /// Returns `None` only when nothing sensible can be sent back: the payload
    /// is not a request, or the response cannot be encoded. Storage that fails
    /// to open is answered with an error response (or `LockFailed` for lock
    /// requests, so the bar's status line reports it).
    pub fn respond(&mut self, payload: &str) -> Option<String> {
        let message: WorkerMessage = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return None;
            }
        };

        let response = match self.ensure_storage() {
            Ok(()) => self.handle_message(message),
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize storage");
                let message_text = format!("Failed to initialize storage: {e}");
                match message {
                    WorkerMessage::LockVault { ticket, .. } => WorkerResponse::LockFailed {
                        ticket,
                        message: message_text,
                    },
                    _ => WorkerResponse::Error { message: message_text },
                }
            }
        };

        serde_json::to_string(&response)
            .map_err(|e| tracing::error!(error = %e, "failed to serialize worker response"))
            .ok()
    }
}
