//! Plugin wiring tests: runtime contribution, interceptor assembly, and the
//! registration-time contract checks.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use temporal_parseable::{
    ParseableConfig, ParseablePlugin, Plugin, TelemetryError, TelemetryRuntime,
};

#[test]
fn test_plugin_name() {
    let plugin = ParseablePlugin::new(ParseableConfig::default());
    assert_eq!(plugin.name(), "temporal-parseable");
}

#[test]
fn test_plugin_owns_a_config_copy() {
    let mut config = ParseableConfig::default();
    let plugin = ParseablePlugin::new(config.clone());

    config.service_name = "mutated".to_string();
    assert_eq!(plugin.config().service_name, "temporal-worker");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_runtimes_are_independent() {
    let plugin = ParseablePlugin::new(ParseableConfig::default());

    let first = plugin.create_runtime().expect("first runtime");
    let second = plugin.create_runtime().expect("second runtime");

    // Tearing one down must not affect the other.
    first.shutdown();

    assert!(second.tracer_provider().is_some());
    assert!(second.logger_provider().is_some());
    assert!(second.meter_provider().is_some());

    second.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_all_signals_contribute_two_interceptors() {
    let plugin = ParseablePlugin::new(ParseableConfig::default());
    let runtime = plugin.create_runtime().expect("runtime should build");

    let interceptors = plugin.interceptors(&runtime).expect("interceptors");
    // Tracing interceptor + metrics interceptor.
    assert_eq!(interceptors.len(), 2);

    runtime.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_metrics_disabled_contributes_tracing_only() {
    let config = ParseableConfig {
        enable_metrics: false,
        ..ParseableConfig::default()
    };
    let plugin = ParseablePlugin::new(config);
    let runtime = plugin.create_runtime().expect("runtime should build");

    let interceptors = plugin.interceptors(&runtime).expect("interceptors");
    assert_eq!(interceptors.len(), 1);

    runtime.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_all_signals_disabled_contributes_no_interceptors() {
    let config = ParseableConfig {
        enable_traces: false,
        enable_logs: false,
        enable_metrics: false,
        ..ParseableConfig::default()
    };
    let plugin = ParseablePlugin::new(config);
    let runtime = plugin.create_runtime().expect("runtime should build");

    let interceptors = plugin.interceptors(&runtime).expect("interceptors");
    assert!(interceptors.is_empty());

    runtime.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_mismatched_runtime_is_rejected() {
    // Runtime built without metrics, plugin configured with them: the
    // registration must fail instead of wiring a dead interceptor.
    let disabled = ParseableConfig {
        enable_metrics: false,
        ..ParseableConfig::default()
    };
    let runtime = TelemetryRuntime::new(disabled).expect("runtime should build");

    let plugin = ParseablePlugin::new(ParseableConfig::default());
    let err = plugin
        .interceptors(&runtime)
        .expect_err("mismatch should be rejected");
    assert!(matches!(
        err,
        TelemetryError::RuntimeMismatch { signal: "metrics" }
    ));

    runtime.shutdown();
}
