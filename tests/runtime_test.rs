//! Runtime construction tests: provider presence tracks the enable-flags.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use temporal_parseable::{ParseableConfig, TelemetryRuntime};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_all_signals_enabled() {
    let runtime =
        TelemetryRuntime::new(ParseableConfig::default()).expect("runtime should build");

    assert!(runtime.tracer_provider().is_some());
    assert!(runtime.logger_provider().is_some());
    assert!(runtime.meter_provider().is_some());
    assert!(runtime.tracer().is_some());
    assert!(runtime.meter().is_some());

    runtime.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_traces_disabled_omits_tracer_provider() {
    let config = ParseableConfig {
        enable_traces: false,
        ..ParseableConfig::default()
    };
    let runtime = TelemetryRuntime::new(config).expect("runtime should build");

    assert!(runtime.tracer_provider().is_none());
    assert!(runtime.tracer().is_none());
    assert!(runtime.logger_provider().is_some());
    assert!(runtime.meter_provider().is_some());

    runtime.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_logs_disabled_omits_logger_provider() {
    let config = ParseableConfig {
        enable_logs: false,
        ..ParseableConfig::default()
    };
    let runtime = TelemetryRuntime::new(config).expect("runtime should build");

    assert!(runtime.tracer_provider().is_some());
    assert!(runtime.logger_provider().is_none());
    assert!(runtime.log_bridge().is_none());
    assert!(runtime.meter_provider().is_some());

    runtime.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_metrics_disabled_omits_meter_provider() {
    let config = ParseableConfig {
        enable_metrics: false,
        ..ParseableConfig::default()
    };
    let runtime = TelemetryRuntime::new(config).expect("runtime should build");

    assert!(runtime.tracer_provider().is_some());
    assert!(runtime.logger_provider().is_some());
    assert!(runtime.meter_provider().is_none());
    assert!(runtime.meter().is_none());

    runtime.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_all_signals_disabled_yields_empty_runtime() {
    let config = ParseableConfig {
        enable_traces: false,
        enable_logs: false,
        enable_metrics: false,
        ..ParseableConfig::default()
    };
    let runtime = TelemetryRuntime::new(config).expect("runtime should build");

    assert!(runtime.tracer_provider().is_none());
    assert!(runtime.logger_provider().is_none());
    assert!(runtime.meter_provider().is_none());

    runtime.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_runtime_keeps_its_config() {
    let config = ParseableConfig {
        service_name: "runtime-config-test".to_string(),
        ..ParseableConfig::default()
    };
    let runtime = TelemetryRuntime::new(config).expect("runtime should build");

    assert_eq!(runtime.config().service_name, "runtime-config-test");

    runtime.shutdown();
}

/// End-to-end scenario from the environment: `PARSEABLE_ENABLE_METRICS=false`
/// with everything else default must yield a trace provider and a log bridge
/// but no metrics reader.
#[test]
fn test_env_driven_metrics_disabled_scenario() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("PARSEABLE_ENABLE_METRICS", "false");

        let config = ParseableConfig::from_env().expect("config should load");

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("tokio runtime");
        let runtime = {
            let _guard = rt.enter();
            TelemetryRuntime::new(config).expect("runtime should build")
        };

        assert!(runtime.tracer_provider().is_some());
        assert!(runtime.logger_provider().is_some());
        assert!(runtime.log_bridge().is_some());
        assert!(runtime.meter_provider().is_none());

        runtime.shutdown();
        Ok(())
    });
}
