//! Subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "vaultbar";

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "vaultbar-otlp.json";

/// Installs the global subscriber: an `EnvFilter` from `trace_level`
/// (default `info`) feeding an OpenTelemetry layer that exports to
/// [`TRACE_FILE`] in the data directory.
///
/// Observability is optional: if the data directory cannot be created the
/// plugin runs without tracing. Only the first call takes effect.
///
/// ```no_run
/// use vaultbar::observability::init_tracing;
/// use vaultbar::Config;
///
/// init_tracing(&Config { trace_level: Some("debug".into()), ..Default::default() });
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
