//! Worker message types for cross-thread communication.
//!
//! Requests travel from the plugin to the worker thread as JSON; each carries
//! an optional trace context so worker spans join the plugin's trace.

use crate::app::lock::LockTicket;
use crate::domain::Entry;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry IDs of the current tracing span.
    ///
    /// Returns `None` if the current span has no valid OpenTelemetry context
    /// (for example when tracing was never initialized).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_preferences(LoadPreferences {}),
    load_entries(LoadEntries {}),
    lock_vault(LockVault { ticket: LockTicket }),
}

/// Messages sent from the plugin to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read the persisted preferences (the password-set flag).
    LoadPreferences {
        /// Trace context for linking spans across threads.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Read the vault entries listed on the home screen.
    LoadEntries {
        /// Trace context for linking spans across threads.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Lock the vault.
    LockVault {
        /// Ticket echoed back in the response.
        ticket: LockTicket,

        /// Trace context for linking spans across threads.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context carried by the message, whatever its variant.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadPreferences { trace_context }
            | Self::LoadEntries { trace_context }
            | Self::LockVault { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Preferences were read.
    PreferencesLoaded {
        /// Whether a master password is set.
        password_set: bool,
    },

    /// Entries were read.
    EntriesLoaded {
        /// All entries, in stored order.
        entries: Vec<Entry>,
    },

    /// The vault is locked.
    VaultLocked {
        /// Ticket of the request.
        ticket: LockTicket,
    },

    /// Locking failed.
    LockFailed {
        /// Ticket of the request.
        ticket: LockTicket,
        /// Human-readable failure.
        message: String,
    },

    /// A non-lock worker operation failed.
    Error {
        /// Human-readable error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_work_without_tracing() {
        let ticket = LockTicket { generation: 1, sequence: 0 };
        let message = WorkerMessage::lock_vault(ticket);
        assert_eq!(message.trace_context(), None);
        assert_eq!(message, WorkerMessage::LockVault { ticket, trace_context: None });
    }

    #[test]
    fn lock_request_survives_ipc_encoding() {
        let message = WorkerMessage::lock_vault(LockTicket { generation: 2, sequence: 5 });
        let payload = serde_json::to_string(&message).unwrap();
        assert!(!payload.contains("trace_context"));
        let decoded: WorkerMessage = serde_json::from_str(&payload).unwrap();
        assert_eq!(decoded, message);
    }
}
