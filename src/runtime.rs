//! Telemetry runtime construction and lifecycle.

use opentelemetry::KeyValue;
use opentelemetry::metrics::{Meter, MeterProvider as _};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::{
    Resource,
    logs::{Logger, LoggerProvider},
    metrics::{PeriodicReader, SdkMeterProvider},
    runtime,
    trace::{RandomIdGenerator, Sampler, Tracer, TracerProvider},
};
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ParseableConfig;
use crate::error::TelemetryError;
use crate::exporters::{create_log_exporter, create_metric_exporter, create_trace_exporter};

/// Instrumentation scope name on every tracer, logger, and meter this crate hands out.
const SCOPE_NAME: &str = "temporal-parseable";

/// How often the metric reader pushes aggregated metrics to Parseable.
const METRIC_EXPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Telemetry providers for one client/worker pair, built per the enable-flags.
///
/// Construction opens the HTTP exporter pools; [`shutdown`](Self::shutdown)
/// flushes and releases them. Construction touches no process-global state;
/// call [`install`](Self::install) to wire the providers into the global
/// tracing subscriber.
///
/// # Example
///
/// ```ignore
/// let runtime = TelemetryRuntime::new(ParseableConfig::from_env()?)?;
/// runtime.install()?;
///
/// // ... run the worker ...
///
/// runtime.shutdown();
/// ```
pub struct TelemetryRuntime {
    config: ParseableConfig,
    tracer_provider: Option<TracerProvider>,
    logger_provider: Option<LoggerProvider>,
    meter_provider: Option<SdkMeterProvider>,
}

impl TelemetryRuntime {
    /// Build providers for every enabled signal.
    ///
    /// A disabled signal gets no provider and opens no exporter. Must be
    /// called within a Tokio runtime; the batch processors spawn their export
    /// loops on it.
    pub fn new(config: ParseableConfig) -> Result<Self, TelemetryError> {
        let resource = build_resource(&config);

        let tracer_provider = if config.enable_traces {
            let exporter = create_trace_exporter(&config)?;
            let provider = TracerProvider::builder()
                .with_batch_exporter(exporter, runtime::Tokio)
                .with_sampler(Sampler::AlwaysOn)
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(resource.clone())
                .build();
            tracing::info!(stream = %config.traces_stream, "traces enabled");
            Some(provider)
        } else {
            None
        };

        let logger_provider = if config.enable_logs {
            let exporter = create_log_exporter(&config)?;
            let provider = LoggerProvider::builder()
                .with_resource(resource.clone())
                .with_batch_exporter(exporter, runtime::Tokio)
                .build();
            tracing::info!(stream = %config.logs_stream, "logs enabled");
            Some(provider)
        } else {
            None
        };

        let meter_provider = if config.enable_metrics {
            let exporter = create_metric_exporter(&config)?;
            let reader = PeriodicReader::builder(exporter, runtime::Tokio)
                .with_interval(METRIC_EXPORT_INTERVAL)
                .build();
            let provider = SdkMeterProvider::builder()
                .with_reader(reader)
                .with_resource(resource)
                .build();
            tracing::info!(stream = %config.metrics_stream, "metrics enabled");
            Some(provider)
        } else {
            None
        };

        Ok(Self {
            config,
            tracer_provider,
            logger_provider,
            meter_provider,
        })
    }

    /// The configuration this runtime was built from.
    pub fn config(&self) -> &ParseableConfig {
        &self.config
    }

    /// The trace provider, when traces are enabled.
    pub fn tracer_provider(&self) -> Option<&TracerProvider> {
        self.tracer_provider.as_ref()
    }

    /// The log provider, when logs are enabled.
    pub fn logger_provider(&self) -> Option<&LoggerProvider> {
        self.logger_provider.as_ref()
    }

    /// The meter provider, when metrics are enabled.
    pub fn meter_provider(&self) -> Option<&SdkMeterProvider> {
        self.meter_provider.as_ref()
    }

    /// A tracer scoped to this crate, when traces are enabled.
    pub fn tracer(&self) -> Option<Tracer> {
        self.tracer_provider.as_ref().map(|p| p.tracer(SCOPE_NAME))
    }

    /// A meter scoped to this crate, when metrics are enabled.
    pub fn meter(&self) -> Option<Meter> {
        self.meter_provider.as_ref().map(|p| p.meter(SCOPE_NAME))
    }

    /// A `tracing` layer exporting spans through this runtime's trace provider.
    pub fn tracing_layer<S>(&self) -> Option<OpenTelemetryLayer<S, Tracer>>
    where
        S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
    {
        self.tracer()
            .map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer))
    }

    /// A `tracing` layer converting log events into OTel log records exported
    /// through this runtime's log provider.
    pub fn log_bridge(&self) -> Option<OpenTelemetryTracingBridge<LoggerProvider, Logger>> {
        self.logger_provider
            .as_ref()
            .map(OpenTelemetryTracingBridge::new)
    }

    /// Install the global tracing subscriber: env-filtered fmt output plus the
    /// span and log layers for whichever signals are enabled.
    ///
    /// This is the only operation that mutates process-global state. Fails if
    /// a global subscriber is already set.
    pub fn install(&self) -> Result<(), TelemetryError> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(self.tracing_layer())
            .with(self.log_bridge())
            .try_init()?;

        Ok(())
    }

    /// Gracefully shut down every constructed provider, flushing pending
    /// spans, log records, and metrics.
    pub fn shutdown(self) {
        tracing::info!("shutting down telemetry pipeline");

        if let Some(provider) = self.tracer_provider
            && let Err(e) = provider.shutdown()
        {
            tracing::error!("Failed to shutdown tracer provider: {}", e);
        }
        if let Some(provider) = self.logger_provider
            && let Err(e) = provider.shutdown()
        {
            tracing::error!("Failed to shutdown logger provider: {}", e);
        }
        if let Some(provider) = self.meter_provider
            && let Err(e) = provider.shutdown()
        {
            tracing::error!("Failed to shutdown meter provider: {}", e);
        }
    }
}

fn build_resource(config: &ParseableConfig) -> Resource {
    Resource::new(vec![KeyValue::new(
        opentelemetry_semantic_conventions::resource::SERVICE_NAME,
        config.service_name.clone(),
    )])
}
