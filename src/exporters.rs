//! OTLP/HTTP exporter factories, one per telemetry signal.
//!
//! Parseable's OTLP endpoints accept JSON encoding only, so every exporter is
//! built with [`Protocol::HttpJson`]. Each request carries the basic-auth
//! header plus the `X-P-Stream` / `X-P-Log-Source` pair Parseable uses to
//! route records into the configured stream.
//!
//! No retry or backoff policy is configured here; the exporters' own batching
//! and error handling apply unchanged.

use opentelemetry_otlp::{
    LogExporter, MetricExporter, Protocol, SpanExporter, WithExportConfig, WithHttpConfig,
};

use crate::config::{ParseableConfig, Signal};
use crate::error::TelemetryError;

/// Create an OTLP/HTTP span exporter targeting the Parseable traces stream.
pub fn create_trace_exporter(config: &ParseableConfig) -> Result<SpanExporter, TelemetryError> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpJson)
        .with_endpoint(config.traces_endpoint())
        .with_headers(config.headers_for_signal(&config.traces_stream, Signal::Traces))
        .build()?;
    Ok(exporter)
}

/// Create an OTLP/HTTP log exporter targeting the Parseable logs stream.
pub fn create_log_exporter(config: &ParseableConfig) -> Result<LogExporter, TelemetryError> {
    let exporter = LogExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpJson)
        .with_endpoint(config.logs_endpoint())
        .with_headers(config.headers_for_signal(&config.logs_stream, Signal::Logs))
        .build()?;
    Ok(exporter)
}

/// Create an OTLP/HTTP metric exporter targeting the Parseable metrics stream.
pub fn create_metric_exporter(config: &ParseableConfig) -> Result<MetricExporter, TelemetryError> {
    let exporter = MetricExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpJson)
        .with_endpoint(config.metrics_endpoint())
        .with_headers(config.headers_for_signal(&config.metrics_stream, Signal::Metrics))
        .build()?;
    Ok(exporter)
}
