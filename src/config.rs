//! Configuration for connecting to Parseable and Temporal.
//!
//! Every field can be overridden through an environment variable with the
//! `PARSEABLE_` prefix (`PARSEABLE_URL` sets `url`, and so on). Explicit
//! overrides made through [`ParseableConfig::builder`] take precedence over
//! the environment, which takes precedence over the documented defaults.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

use crate::error::ConfigError;

/// Prefix shared by every environment variable this crate reads.
pub const ENV_PREFIX: &str = "PARSEABLE_";

/// One telemetry signal. Parseable requires a signal-specific
/// `X-P-Log-Source` value on each OTLP ingestion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Traces,
    Logs,
    Metrics,
}

impl Signal {
    /// The `X-P-Log-Source` value Parseable expects for this signal.
    pub fn log_source(self) -> &'static str {
        match self {
            Signal::Traces => "otel-traces",
            Signal::Logs => "otel-logs",
            Signal::Metrics => "otel-metrics",
        }
    }

    /// OTLP ingestion path for this signal, relative to the Parseable URL.
    pub fn path(self) -> &'static str {
        match self {
            Signal::Traces => "v1/traces",
            Signal::Logs => "v1/logs",
            Signal::Metrics => "v1/metrics",
        }
    }
}

/// Connection settings for Parseable and Temporal.
///
/// The record is immutable once constructed; build a new
/// [`TelemetryRuntime`](crate::TelemetryRuntime) to pick up changed settings.
///
/// # Example
///
/// ```ignore
/// // Environment only
/// let config = ParseableConfig::from_env()?;
///
/// // Environment plus explicit overrides
/// let config = ParseableConfig::builder()
///     .url("http://parseable.internal:8000")
///     .service_name("payments-worker")
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseableConfig {
    /// Parseable base URL (default: `http://localhost:8000`).
    pub url: String,
    /// Basic-auth username (default: `admin`).
    pub username: String,
    /// Basic-auth password (default: `admin`).
    pub password: String,

    /// Stream receiving trace data (default: `temporal-traces`).
    pub traces_stream: String,
    /// Stream receiving log data (default: `temporal-logs`).
    pub logs_stream: String,
    /// Stream receiving metric data (default: `temporal-metrics`).
    pub metrics_stream: String,

    /// Temporal frontend address (default: `localhost:7233`).
    pub temporal_host: String,
    /// Temporal namespace (default: `default`).
    pub temporal_namespace: String,

    /// `service.name` resource attribute on every exported record
    /// (default: `temporal-worker`).
    pub service_name: String,

    /// Export traces (default: true).
    pub enable_traces: bool,
    /// Export logs (default: true).
    pub enable_logs: bool,
    /// Export metrics (default: true).
    pub enable_metrics: bool,
}

impl Default for ParseableConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            traces_stream: "temporal-traces".to_string(),
            logs_stream: "temporal-logs".to_string(),
            metrics_stream: "temporal-metrics".to_string(),
            temporal_host: "localhost:7233".to_string(),
            temporal_namespace: "default".to_string(),
            service_name: "temporal-worker".to_string(),
            enable_traces: true,
            enable_logs: true,
            enable_metrics: true,
        }
    }
}

impl ParseableConfig {
    /// Load configuration from `PARSEABLE_`-prefixed environment variables,
    /// substituting the documented default for any variable that is unset.
    ///
    /// Fails fast on malformed values (unparseable booleans, invalid URL)
    /// with an error naming the offending key.
    pub fn from_env() -> Result<Self, ConfigError> {
        ConfigBuilder::default().build()
    }

    /// Start building a configuration with explicit in-code overrides.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The `Authorization` header value Parseable expects.
    pub fn auth_header(&self) -> String {
        let token = BASE64.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }

    /// HTTP headers Parseable requires on OTLP requests for `signal`,
    /// routed into `stream`.
    pub fn headers_for_signal(&self, stream: &str, signal: Signal) -> HashMap<String, String> {
        HashMap::from([
            ("Authorization".to_string(), self.auth_header()),
            ("X-P-Stream".to_string(), stream.to_string()),
            ("X-P-Log-Source".to_string(), signal.log_source().to_string()),
        ])
    }

    /// OTLP ingestion endpoint for `signal` on the configured Parseable URL.
    pub fn endpoint_for(&self, signal: Signal) -> String {
        format!("{}/{}", self.url, signal.path())
    }

    pub fn traces_endpoint(&self) -> String {
        self.endpoint_for(Signal::Traces)
    }

    pub fn logs_endpoint(&self) -> String {
        self.endpoint_for(Signal::Logs)
    }

    pub fn metrics_endpoint(&self) -> String {
        self.endpoint_for(Signal::Metrics)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.url).map_err(|source| ConfigError::InvalidUrl {
            url: self.url.clone(),
            source,
        })?;
        Ok(())
    }
}

/// Builder for [`ParseableConfig`].
///
/// Unset fields fall through to the environment, then to the defaults, so the
/// builder can be used both for full programmatic configuration and for
/// selectively overriding a single variable.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ConfigBuilder {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    traces_stream: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logs_stream: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics_stream: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temporal_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temporal_namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_traces: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_logs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_metrics: Option<bool>,
}

impl ConfigBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn traces_stream(mut self, stream: impl Into<String>) -> Self {
        self.traces_stream = Some(stream.into());
        self
    }

    pub fn logs_stream(mut self, stream: impl Into<String>) -> Self {
        self.logs_stream = Some(stream.into());
        self
    }

    pub fn metrics_stream(mut self, stream: impl Into<String>) -> Self {
        self.metrics_stream = Some(stream.into());
        self
    }

    pub fn temporal_host(mut self, host: impl Into<String>) -> Self {
        self.temporal_host = Some(host.into());
        self
    }

    pub fn temporal_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.temporal_namespace = Some(namespace.into());
        self
    }

    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    pub fn enable_traces(mut self, enabled: bool) -> Self {
        self.enable_traces = Some(enabled);
        self
    }

    pub fn enable_logs(mut self, enabled: bool) -> Self {
        self.enable_logs = Some(enabled);
        self
    }

    pub fn enable_metrics(mut self, enabled: bool) -> Self {
        self.enable_metrics = Some(enabled);
        self
    }

    /// Resolve the configuration: defaults, then environment, then the
    /// overrides set on this builder.
    pub fn build(self) -> Result<ParseableConfig, ConfigError> {
        let config: ParseableConfig = Figment::from(Serialized::defaults(ParseableConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(self))
            .extract()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header_encodes_credentials() {
        let config = ParseableConfig::default();
        assert_eq!(config.auth_header(), format!("Basic {}", BASE64.encode("admin:admin")));
    }

    #[test]
    fn test_headers_carry_stream_and_log_source() {
        let config = ParseableConfig::default();
        let headers = config.headers_for_signal("my-stream", Signal::Logs);
        assert_eq!(headers.get("X-P-Stream").map(String::as_str), Some("my-stream"));
        assert_eq!(headers.get("X-P-Log-Source").map(String::as_str), Some("otel-logs"));
        assert!(headers.get("Authorization").unwrap().starts_with("Basic "));
    }

    #[test]
    fn test_endpoints_append_signal_path() {
        let config = ParseableConfig::default();
        assert_eq!(config.traces_endpoint(), "http://localhost:8000/v1/traces");
        assert_eq!(config.logs_endpoint(), "http://localhost:8000/v1/logs");
        assert_eq!(config.metrics_endpoint(), "http://localhost:8000/v1/metrics");
    }
}
