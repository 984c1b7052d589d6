//! Worker interceptor extension points and the tracing interceptor.
//!
//! The host invokes registered interceptors synchronously around each
//! workflow/activity execution boundary: [`WorkerInterceptor::on_task_start`]
//! when execution begins, [`TaskGuard::finish`] when it completes, and
//! [`WorkerInterceptor::on_schedule`] on the client path before task headers
//! are sent to the server.

use std::collections::HashMap;
use std::fmt::Debug;
use tracing::field::Empty;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::propagation::{extract_trace_context, inject_trace_context};

/// Which execution boundary a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Workflow,
    Activity,
}

/// Context for one workflow/activity invocation, supplied by the host.
#[derive(Debug, Clone)]
pub struct TaskInfo {
    pub kind: TaskKind,
    /// Workflow type or activity type name, depending on `kind`.
    pub task_type: String,
    /// Type of the workflow this task belongs to.
    pub workflow_type: String,
    pub workflow_id: String,
    pub run_id: String,
    pub task_queue: String,
    pub namespace: String,
    /// 1-based execution attempt.
    pub attempt: u32,
    /// Task headers, carrying trace context among other things.
    pub headers: HashMap<String, String>,
}

/// How a task execution ended.
#[derive(Debug, Clone)]
pub enum TaskOutcome {
    Completed,
    Failed(String),
}

/// Extension points a worker host invokes around task execution.
pub trait WorkerInterceptor: Send + Sync + Debug {
    /// Invoked when the host begins executing a task. The returned guard
    /// lives for the duration of the execution; the host finishes it with
    /// the outcome once the task completes.
    fn on_task_start(&self, task: &TaskInfo) -> Box<dyn TaskGuard>;

    /// Invoked on the client path when new work is scheduled, before the
    /// task headers are sent to the server.
    fn on_schedule(&self, headers: &mut HashMap<String, String>) {
        let _ = headers;
    }
}

/// Live observation of a single task execution.
pub trait TaskGuard: Send {
    /// Complete the observation with the task's outcome.
    fn finish(self: Box<Self>, outcome: &TaskOutcome);

    /// The span covering the execution, when the guard carries one. Hosts can
    /// use it to parent spans opened inside the task body.
    fn span(&self) -> Option<&tracing::Span> {
        None
    }
}

/// Opens a span around each workflow/activity invocation and carries trace
/// context across the scheduling boundary.
///
/// Spans are named `RunWorkflow:<type>` / `RunActivity:<type>` and parented
/// to the context extracted from the task headers, so a workflow that
/// schedules activities produces one connected trace even when client and
/// worker run in different processes.
#[derive(Debug)]
pub struct TracingInterceptor;

impl TracingInterceptor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkerInterceptor for TracingInterceptor {
    fn on_task_start(&self, task: &TaskInfo) -> Box<dyn TaskGuard> {
        let span = match task.kind {
            TaskKind::Workflow => tracing::info_span!(
                "workflow_task",
                otel.name = %format!("RunWorkflow:{}", task.task_type),
                temporal.workflow_type = %task.workflow_type,
                temporal.workflow_id = %task.workflow_id,
                temporal.run_id = %task.run_id,
                temporal.task_queue = %task.task_queue,
                temporal.namespace = %task.namespace,
                temporal.attempt = task.attempt,
                otel.status_code = Empty,
                otel.status_message = Empty,
            ),
            TaskKind::Activity => tracing::info_span!(
                "activity_task",
                otel.name = %format!("RunActivity:{}", task.task_type),
                temporal.activity_type = %task.task_type,
                temporal.workflow_type = %task.workflow_type,
                temporal.workflow_id = %task.workflow_id,
                temporal.run_id = %task.run_id,
                temporal.task_queue = %task.task_queue,
                temporal.namespace = %task.namespace,
                temporal.attempt = task.attempt,
                otel.status_code = Empty,
                otel.status_message = Empty,
            ),
        };
        span.set_parent(extract_trace_context(&task.headers));

        Box::new(TracingTaskGuard { span })
    }

    fn on_schedule(&self, headers: &mut HashMap<String, String>) {
        inject_trace_context(headers);
    }
}

struct TracingTaskGuard {
    span: tracing::Span,
}

impl TaskGuard for TracingTaskGuard {
    fn finish(self: Box<Self>, outcome: &TaskOutcome) {
        match outcome {
            TaskOutcome::Completed => {
                self.span.record("otel.status_code", "OK");
            }
            TaskOutcome::Failed(message) => {
                self.span.record("otel.status_code", "ERROR");
                self.span.record("otel.status_message", message.as_str());
            }
        }
        // Dropping the span closes it and hands it to the exporter.
    }

    fn span(&self) -> Option<&tracing::Span> {
        Some(&self.span)
    }
}
