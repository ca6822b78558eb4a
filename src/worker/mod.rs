//! Background worker for storage and the vault lock.
//!
//! Storage I/O, including the lock itself, runs on Zellij's worker thread so
//! the bar stays interactive while a lock is pending.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: request processing

pub mod handler;
pub mod messages;

pub use handler::VaultWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
