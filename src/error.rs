use opentelemetry::trace::TraceError;
use opentelemetry_sdk::logs::LogError;
use opentelemetry_sdk::metrics::MetricError;
use thiserror::Error;

/// Error type for configuration loading failures.
///
/// Malformed values fail fast at load time rather than silently falling back
/// to defaults; the error message names the offending key.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    #[error("Invalid Parseable URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Error type for telemetry initialization failures.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to initialize OTLP trace exporter: {0}")]
    TracerInit(#[from] TraceError),

    #[error("Failed to initialize OTLP log exporter: {0}")]
    LoggerInit(#[from] LogError),

    #[error("Failed to initialize OTLP metric exporter: {0}")]
    MetricsInit(#[from] MetricError),

    #[error("Failed to set global subscriber: {0}")]
    SubscriberInit(#[from] tracing_subscriber::util::TryInitError),

    /// The runtime handed to [`Plugin::interceptors`](crate::Plugin::interceptors)
    /// was built from a configuration that disables a signal this plugin enables.
    #[error("{signal} are enabled but the supplied runtime has no {signal} provider")]
    RuntimeMismatch { signal: &'static str },
}
