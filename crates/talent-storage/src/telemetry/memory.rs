use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use talent_core::errors::{TalentError, TalentResult, TelemetryError};
use talent_core::models::{QueryId, SearchMetrics, UserFeedback};
use talent_core::traits::ITelemetryStore;

/// Process-local telemetry store. Feedback for unknown queries is dropped.
#[derive(Default)]
pub struct InMemoryTelemetryStore {
    records: Mutex<HashMap<QueryId, SearchMetrics>>,
}

impl InMemoryTelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> TalentError {
    TelemetryError::WriteFailed {
        reason: "telemetry lock poisoned".to_string(),
    }
    .into()
}

impl ITelemetryStore for InMemoryTelemetryStore {
    fn append(&self, metrics: &SearchMetrics) -> TalentResult<()> {
        let mut records = self.records.lock().map_err(|_| poisoned())?;
        let mut incoming = metrics.clone();
        if let Some(existing) = records.get(&metrics.query_id) {
            incoming.created_at = existing.created_at;
            if incoming.feedback.is_none() {
                incoming.feedback = existing.feedback.clone();
            }
        }
        records.insert(incoming.query_id.clone(), incoming);
        Ok(())
    }

    fn attach_feedback(&self, query_id: &QueryId, feedback: &UserFeedback) -> TalentResult<()> {
        let mut records = self.records.lock().map_err(|_| poisoned())?;
        if let Some(record) = records.get_mut(query_id) {
            record.feedback = Some(feedback.clone());
        }
        Ok(())
    }

    fn get(&self, query_id: &QueryId) -> TalentResult<Option<SearchMetrics>> {
        let records = self.records.lock().map_err(|_| poisoned())?;
        Ok(records.get(query_id).cloned())
    }

    fn list_since(&self, since: DateTime<Utc>) -> TalentResult<Vec<SearchMetrics>> {
        let records = self.records.lock().map_err(|_| poisoned())?;
        let mut out: Vec<SearchMetrics> = records
            .values()
            .filter(|m| m.created_at >= since)
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.query_id.cmp(&b.query_id))
        });
        Ok(out)
    }
}
