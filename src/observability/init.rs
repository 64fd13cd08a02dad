//! Subscriber setup: `EnvFilter` plus an OpenTelemetry layer exporting to file.

use super::span_formatter::SCOPE_NAME;
use super::tracer;
use crate::domain::Result;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "toaster-otlp.json";

/// Level used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Where spans are written for `config`.
#[must_use]
pub fn trace_file_path(config: &Config) -> PathBuf {
    config
        .trace_file
        .clone()
        .unwrap_or_else(|| paths::data_dir().join(TRACE_FILE_NAME))
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.trace_level`. Calling this again
/// after a subscriber is installed has no effect.
///
/// # Errors
///
/// Returns [`ToasterError::Io`](crate::ToasterError::Io) if the directory of
/// the trace file cannot be created.
pub fn init_tracing(config: &Config) -> Result<()> {
    let trace_file = trace_file_path(config);
    if let Some(dir) = trace_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::file_tracer_provider(trace_file.clone(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(trace_file = %trace_file.display(), level, "tracing initialized");
    }
    Ok(())
}
