//! Structured log events for key evaluation and pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

use talent_core::models::{QueryId, QueryType, RetrievalMethod};

/// Log a finished search as recorded by telemetry.
pub fn search_completed(
    query_id: &QueryId,
    query_type: QueryType,
    method: RetrievalMethod,
    results: usize,
    elapsed_ms: u64,
) {
    tracing::info!(
        event = "search_completed",
        query_id = %query_id,
        query_type = query_type.as_str(),
        method = method.as_str(),
        results = results,
        elapsed_ms = elapsed_ms,
        "search completed"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log feedback attached to a query.
pub fn feedback_attached(query_id: &QueryId, rating: u8) {
    tracing::info!(
        event = "feedback_attached",
        query_id = %query_id,
        rating = rating,
        "feedback attached"
    );
}

/// Log a telemetry write that was dropped.
pub fn telemetry_dropped(query_id: &QueryId, reason: &str) {
    tracing::warn!(
        event = "telemetry_dropped",
        query_id = %query_id,
        reason = %reason,
        "telemetry dropped"
    );
}
