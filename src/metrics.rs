//! Activity metrics recorded through the worker interceptor.
//!
//! Emits the following instruments, exported to the Parseable metrics stream:
//!
//! Counters:
//! - `temporal.activity.started`   - activities started
//! - `temporal.activity.completed` - activities completed successfully
//! - `temporal.activity.failed`    - activities that returned an error
//!
//! Histograms:
//! - `temporal.activity.duration`  - activity execution time (seconds)
//!
//! All instruments carry `activity_type`, `workflow_type`, `task_queue`, and
//! `namespace` attributes for filtering in Parseable.
//!
//! Workflow tasks are not measured here: workflow bodies must stay
//! deterministic, so their execution data is captured via traces instead.

use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Histogram, Meter};
use std::time::Instant;

use crate::interceptor::{TaskGuard, TaskInfo, TaskKind, TaskOutcome, WorkerInterceptor};

// Instrument name constants
pub const ACTIVITY_STARTED: &str = "temporal.activity.started";
pub const ACTIVITY_COMPLETED: &str = "temporal.activity.completed";
pub const ACTIVITY_FAILED: &str = "temporal.activity.failed";
pub const ACTIVITY_DURATION: &str = "temporal.activity.duration";

/// Instrument bundle for activity execution metrics, built once per meter.
#[derive(Clone, Debug)]
pub struct ActivityMetrics {
    started: Counter<u64>,
    completed: Counter<u64>,
    failed: Counter<u64>,
    duration: Histogram<f64>,
}

impl ActivityMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            started: meter
                .u64_counter(ACTIVITY_STARTED)
                .with_description("Activities started")
                .build(),
            completed: meter
                .u64_counter(ACTIVITY_COMPLETED)
                .with_description("Activities completed successfully")
                .build(),
            failed: meter
                .u64_counter(ACTIVITY_FAILED)
                .with_description("Activities that returned an error")
                .build(),
            duration: meter
                .f64_histogram(ACTIVITY_DURATION)
                .with_unit("s")
                .with_description("Activity execution duration in seconds")
                .build(),
        }
    }

    fn attributes(task: &TaskInfo) -> [KeyValue; 4] {
        [
            KeyValue::new("activity_type", task.task_type.clone()),
            KeyValue::new("workflow_type", task.workflow_type.clone()),
            KeyValue::new("task_queue", task.task_queue.clone()),
            KeyValue::new("namespace", task.namespace.clone()),
        ]
    }

    /// Record an activity start
    pub fn record_started(&self, task: &TaskInfo) {
        self.started.add(1, &Self::attributes(task));
    }

    /// Record a successful activity completion
    pub fn record_completed(&self, task: &TaskInfo) {
        self.completed.add(1, &Self::attributes(task));
    }

    /// Record an activity failure
    pub fn record_failed(&self, task: &TaskInfo) {
        self.failed.add(1, &Self::attributes(task));
    }

    /// Record activity execution duration
    pub fn record_duration(&self, task: &TaskInfo, seconds: f64) {
        self.duration.record(seconds, &Self::attributes(task));
    }
}

/// Worker interceptor that records activity execution metrics.
#[derive(Debug)]
pub struct MetricsInterceptor {
    metrics: ActivityMetrics,
}

impl MetricsInterceptor {
    pub fn new(meter: &Meter) -> Self {
        Self {
            metrics: ActivityMetrics::new(meter),
        }
    }
}

impl WorkerInterceptor for MetricsInterceptor {
    fn on_task_start(&self, task: &TaskInfo) -> Box<dyn TaskGuard> {
        if task.kind != TaskKind::Activity {
            return Box::new(NoopGuard);
        }

        self.metrics.record_started(task);
        Box::new(MetricsTaskGuard {
            metrics: self.metrics.clone(),
            task: task.clone(),
            started_at: Instant::now(),
        })
    }
}

struct NoopGuard;

impl TaskGuard for NoopGuard {
    fn finish(self: Box<Self>, _outcome: &TaskOutcome) {}
}

struct MetricsTaskGuard {
    metrics: ActivityMetrics,
    task: TaskInfo,
    started_at: Instant,
}

impl TaskGuard for MetricsTaskGuard {
    fn finish(self: Box<Self>, outcome: &TaskOutcome) {
        match outcome {
            TaskOutcome::Completed => self.metrics.record_completed(&self.task),
            TaskOutcome::Failed(_) => self.metrics.record_failed(&self.task),
        }
        self.metrics
            .record_duration(&self.task, self.started_at.elapsed().as_secs_f64());
    }
}
