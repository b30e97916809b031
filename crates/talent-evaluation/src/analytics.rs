//! Windowed performance analytics over stored telemetry.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use talent_core::errors::TalentResult;
use talent_core::models::{QueryType, SearchMetrics};
use talent_core::traits::ITelemetryStore;

use crate::metrics::mean;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MethodPerformance {
    pub count: usize,
    pub avg_score: f64,
    pub avg_time_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceAnalytics {
    pub window_hours: u32,
    pub total_queries: usize,
    pub average_response_time_ms: f64,
    /// Mean of per-query average match scores.
    pub average_relevance_score: f64,
    pub query_type_distribution: BTreeMap<QueryType, usize>,
    /// Keyed by retrieval method name.
    pub method_performance: BTreeMap<String, MethodPerformance>,
}

impl PerformanceAnalytics {
    /// Read the records of the last `window_hours` from `store` and aggregate.
    pub fn compute(
        store: &dyn ITelemetryStore,
        window_hours: u32,
        now: DateTime<Utc>,
    ) -> TalentResult<Self> {
        let since = now - Duration::hours(i64::from(window_hours));
        let records = store.list_since(since)?;
        Ok(Self::from_records(&records, window_hours))
    }

    pub fn from_records(records: &[SearchMetrics], window_hours: u32) -> Self {
        let times: Vec<f64> = records.iter().map(|m| m.response_time_ms as f64).collect();
        let scores: Vec<f64> = records.iter().map(|m| m.average_match_score).collect();

        let mut query_type_distribution = BTreeMap::new();
        let mut by_method: BTreeMap<String, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for m in records {
            *query_type_distribution.entry(m.query_type).or_insert(0) += 1;
            let (s, t) = by_method.entry(m.method.as_str().to_string()).or_default();
            s.push(m.average_match_score);
            t.push(m.response_time_ms as f64);
        }

        let method_performance = by_method
            .into_iter()
            .map(|(method, (s, t))| {
                let perf = MethodPerformance {
                    count: s.len(),
                    avg_score: mean(&s),
                    avg_time_ms: mean(&t),
                };
                (method, perf)
            })
            .collect();

        Self {
            window_hours,
            total_queries: records.len(),
            average_response_time_ms: mean(&times),
            average_relevance_score: mean(&scores),
            query_type_distribution,
            method_performance,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_queries == 0
    }
}
