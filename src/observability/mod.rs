//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileExporter → OTLP/JSON lines
//! ```
//!
//! Spans go to `toaster-otlp.json` in the data directory (or the configured
//! `trace_file`), one OTLP document per line. The file rotates at 10 MB and
//! keeps three timestamped backups.
//!
//! Trace level is taken from `RUST_LOG`, then `Config::trace_level`, then
//! `info`.
//!
//! ```no_run
//! use toaster::observability::init_tracing;
//! use toaster::Config;
//!
//! init_tracing(&Config::default())?;
//! tracing::debug!("tracing is active");
//! # Ok::<(), toaster::ToasterError>(())
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, trace_file_path, DEFAULT_TRACE_LEVEL, TRACE_FILE_NAME};
