//! Request trace id carried in task-local storage.
//!
//! `TraceSpan` scopes each request future with its id so error rendering and
//! DB error logging can attach it without threading it through signatures.

use std::future::Future;

use tokio::task_local;

/// Returned when no request scope is active (startup, unit tests).
pub const UNKNOWN_TRACE_ID: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNKNOWN_TRACE_ID.to_string())
}

/// Run `future` with `trace_id` visible to [`trace_id`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
