//! Export Temporal workflow telemetry to Parseable.
//!
//! This crate wires a workflow host's plugin/interceptor extension points to
//! OTLP/HTTP exporters pointed at a [Parseable](https://www.parseable.com)
//! backend:
//!
//! - [`ParseableConfig`] - settings read from `PARSEABLE_`-prefixed
//!   environment variables, with in-code overrides via the builder
//! - [`TelemetryRuntime`] - the tracer/logger/meter providers for one
//!   client/worker pair, each signal independently togglable
//! - [`ParseablePlugin`] - the [`Plugin`] implementation contributing the
//!   runtime and the tracing/metrics interceptors to the host
//!
//! Span creation, log record batching, metric aggregation, and OTLP transport
//! all happen inside the OpenTelemetry SDK; this crate only configures and
//! registers them. Pointing `PARSEABLE_URL` at an intermediary collector's
//! OTLP endpoint works unchanged.
//!
//! # Usage
//!
//! ```ignore
//! let plugin = ParseablePlugin::from_env()?;
//!
//! let runtime = plugin.create_runtime()?;
//! runtime.install()?;
//!
//! let client = Client::connect(&runtime.config().temporal_host)
//!     .namespace(&runtime.config().temporal_namespace)
//!     .runtime(&runtime)
//!     .await?;
//!
//! let worker = Worker::new(client, "my-queue")
//!     .interceptors(plugin.interceptors(&runtime)?)
//!     .build()?;
//!
//! // ... run the worker ...
//!
//! runtime.shutdown();
//! ```

mod config;
mod error;
mod exporters;
mod interceptor;
mod metrics;
mod plugin;
mod propagation;
mod runtime;

// Re-export public API
pub use config::{ConfigBuilder, ENV_PREFIX, ParseableConfig, Signal};
pub use error::{ConfigError, TelemetryError};
pub use exporters::{create_log_exporter, create_metric_exporter, create_trace_exporter};
pub use interceptor::{
    TaskGuard, TaskInfo, TaskKind, TaskOutcome, TracingInterceptor, WorkerInterceptor,
};
pub use metrics::{
    ACTIVITY_COMPLETED, ACTIVITY_DURATION, ACTIVITY_FAILED, ACTIVITY_STARTED, ActivityMetrics,
    MetricsInterceptor,
};
pub use plugin::{PLUGIN_NAME, ParseablePlugin, Plugin};
pub use propagation::{
    TRACEPARENT_HEADER, extract_trace_context, has_trace_context, inject_trace_context,
};
pub use runtime::TelemetryRuntime;
