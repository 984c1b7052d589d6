//! W3C Trace Context propagation across workflow task boundaries.
//!
//! Trace context flows from the client that schedules a workflow or activity
//! to the worker that executes it, carried in the task's string headers using
//! the W3C Trace Context format:
//! `traceparent: 00-{trace_id}-{span_id}-{flags}`

use opentelemetry::Context;
use opentelemetry::propagation::{Extractor, Injector, TextMapPropagator};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use std::collections::HashMap;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Header key carrying the W3C trace parent.
pub const TRACEPARENT_HEADER: &str = "traceparent";

/// Wrapper to implement `Injector` for HashMap<String, String>
struct HashMapInjector<'a>(&'a mut HashMap<String, String>);

impl Injector for HashMapInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        self.0.insert(key.to_string(), value);
    }
}

/// Wrapper to implement `Extractor` for HashMap<String, String>
struct HashMapExtractor<'a>(&'a HashMap<String, String>);

impl Extractor for HashMapExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// Inject the current span's trace context into a task headers map.
///
/// Called on the client path when a workflow or activity is scheduled, so the
/// executing worker can continue the caller's trace. Writes nothing when no
/// valid span context is active.
pub fn inject_trace_context(headers: &mut HashMap<String, String>) {
    let propagator = TraceContextPropagator::new();
    let cx = tracing::Span::current().context();

    let mut injector = HashMapInjector(headers);
    propagator.inject_context(&cx, &mut injector);
}

/// Extract trace context from a task headers map.
///
/// Called at execution time to restore the scheduling caller's trace context.
/// The returned `Context` can be used to set the parent of a new span; it is
/// empty (but valid) when the headers carry no context.
pub fn extract_trace_context(headers: &HashMap<String, String>) -> Context {
    let propagator = TraceContextPropagator::new();
    let extractor = HashMapExtractor(headers);
    propagator.extract(&extractor)
}

/// Check if headers contain trace context.
pub fn has_trace_context(headers: &HashMap<String, String>) -> bool {
    headers.contains_key(TRACEPARENT_HEADER)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_extract_roundtrip() {
        // Without an active span, inject writes nothing and extract still
        // returns a valid (empty) context.
        let mut headers = HashMap::new();
        inject_trace_context(&mut headers);
        let _cx = extract_trace_context(&headers);
    }

    #[test]
    fn test_has_trace_context() {
        let mut headers = HashMap::new();
        assert!(!has_trace_context(&headers));

        headers.insert(
            TRACEPARENT_HEADER.to_string(),
            "00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01".to_string(),
        );
        assert!(has_trace_context(&headers));
    }

    #[test]
    fn test_extract_remote_parent() {
        use opentelemetry::trace::TraceContextExt;

        let mut headers = HashMap::new();
        headers.insert(
            TRACEPARENT_HEADER.to_string(),
            "00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01".to_string(),
        );

        let cx = extract_trace_context(&headers);
        let span_context = cx.span().span_context().clone();
        assert!(span_context.is_valid());
        assert!(span_context.is_remote());
        assert_eq!(
            span_context.trace_id().to_string(),
            "0af7651916cd43dd8448eb211c80319c"
        );
    }

    #[test]
    fn test_extractor_keys() {
        let mut headers = HashMap::new();
        headers.insert("key1".to_string(), "value1".to_string());
        headers.insert("key2".to_string(), "value2".to_string());

        let extractor = HashMapExtractor(&headers);
        let keys = extractor.keys();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"key1"));
        assert!(keys.contains(&"key2"));
    }
}
