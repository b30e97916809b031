use chrono::{DateTime, Utc};

use crate::errors::TalentResult;
use crate::models::{QueryId, SearchMetrics, UserFeedback};

/// Durable, append-only store for per-query telemetry.
pub trait ITelemetryStore: Send + Sync {
    /// Insert a record. A second append for the same query id replaces the
    /// measured fields and keeps any feedback already attached.
    fn append(&self, metrics: &SearchMetrics) -> TalentResult<()>;

    /// Attach feedback to a query id. Last write wins. Unknown ids must not error.
    fn attach_feedback(&self, query_id: &QueryId, feedback: &UserFeedback) -> TalentResult<()>;

    fn get(&self, query_id: &QueryId) -> TalentResult<Option<SearchMetrics>>;

    /// Records created at or after `since`, oldest first.
    fn list_since(&self, since: DateTime<Utc>) -> TalentResult<Vec<SearchMetrics>>;
}
