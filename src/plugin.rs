//! The plugin contract consumed by the workflow host, and the Parseable
//! implementation of it.

use std::sync::Arc;

use crate::config::ParseableConfig;
use crate::error::{ConfigError, TelemetryError};
use crate::interceptor::{TracingInterceptor, WorkerInterceptor};
use crate::metrics::MetricsInterceptor;
use crate::runtime::TelemetryRuntime;

/// Name under which the plugin registers with the host.
pub const PLUGIN_NAME: &str = "temporal-parseable";

/// Extension points the workflow host invokes during construction.
///
/// The host asks for a runtime when the client is built and for interceptors
/// when a worker is built. A plugin has no lifecycle beyond that: constructed,
/// registered with the host, torn down with the host.
pub trait Plugin: Send + Sync {
    /// Identifies the plugin to the host.
    fn name(&self) -> &'static str;

    /// Contribute the telemetry runtime at client-construction time.
    fn create_runtime(&self) -> Result<TelemetryRuntime, TelemetryError>;

    /// Contribute worker interceptors at worker-construction time.
    ///
    /// `runtime` must be one previously obtained from
    /// [`create_runtime`](Self::create_runtime); supplying a runtime whose
    /// providers don't match this plugin's enabled signals is a contract
    /// violation and fails fast.
    fn interceptors(
        &self,
        runtime: &TelemetryRuntime,
    ) -> Result<Vec<Arc<dyn WorkerInterceptor>>, TelemetryError>;
}

/// A workflow-host plugin that exports traces, logs, and metrics to Parseable.
///
/// # Example
///
/// ```ignore
/// let plugin = ParseablePlugin::from_env()?;
/// let runtime = plugin.create_runtime()?;
/// runtime.install()?;
///
/// // Hand `runtime` to the client and the plugin's interceptors to the
/// // worker, per the host's registration API:
/// let interceptors = plugin.interceptors(&runtime)?;
/// ```
pub struct ParseablePlugin {
    config: ParseableConfig,
}

impl ParseablePlugin {
    pub fn new(config: ParseableConfig) -> Self {
        Self { config }
    }

    /// Build a plugin from `PARSEABLE_`-prefixed environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(ParseableConfig::from_env()?))
    }

    /// The configuration this plugin was built with.
    pub fn config(&self) -> &ParseableConfig {
        &self.config
    }
}

impl Plugin for ParseablePlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn create_runtime(&self) -> Result<TelemetryRuntime, TelemetryError> {
        // A fresh runtime per call: two registrations never share providers.
        TelemetryRuntime::new(self.config.clone())
    }

    fn interceptors(
        &self,
        runtime: &TelemetryRuntime,
    ) -> Result<Vec<Arc<dyn WorkerInterceptor>>, TelemetryError> {
        let mut interceptors: Vec<Arc<dyn WorkerInterceptor>> = Vec::new();

        if self.config.enable_traces {
            if runtime.tracer_provider().is_none() {
                return Err(TelemetryError::RuntimeMismatch { signal: "traces" });
            }
            interceptors.push(Arc::new(TracingInterceptor::new()));
        }

        if self.config.enable_metrics {
            let Some(meter) = runtime.meter() else {
                return Err(TelemetryError::RuntimeMismatch { signal: "metrics" });
            };
            interceptors.push(Arc::new(MetricsInterceptor::new(&meter)));
        }

        Ok(interceptors)
    }
}
