//! OpenTelemetry tracing exported to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → vaultbar-otlp.json
//! ```
//!
//! The trace file holds one OTLP JSON document per line and rotates into
//! numbered backups. Worker spans join the plugin's traces through the trace
//! context carried by each worker message.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - `tracer`: provider and file exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: rotating line writer

mod file_writer;
pub mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE};
