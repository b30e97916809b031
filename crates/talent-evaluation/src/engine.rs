//! EvaluationService: the observational side of the search pipeline.
//!
//! Receives completed searches as an [`ISearchObserver`], hands them to the
//! background [`TelemetryWriter`], accepts user feedback, and answers
//! analytics queries from the telemetry store.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use talent_core::config::EvaluationConfig;
use talent_core::errors::TalentResult;
use talent_core::models::{
    CandidateId, CompletedSearch, EvaluationMetrics, QueryId, RankedResult, SearchMetrics,
    UserFeedback,
};
use talent_core::traits::{IEmbeddingProvider, ISearchObserver, ITelemetryStore};
use tracing::{debug, warn};

use crate::analytics::PerformanceAnalytics;
use crate::evaluator::Evaluator;
use crate::recommendations::{recommend, Recommendation, Severity};
use crate::writer::{TelemetryWriter, WriterStats};

pub struct EvaluationService {
    store: Arc<dyn ITelemetryStore>,
    evaluator: Evaluator,
    /// None when telemetry is disabled.
    writer: Option<TelemetryWriter>,
    config: EvaluationConfig,
}

impl EvaluationService {
    pub fn new(
        store: Arc<dyn ITelemetryStore>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: EvaluationConfig,
    ) -> Self {
        Self::with_evaluator(store, Evaluator::new(embedder), config)
    }

    pub fn with_evaluator(
        store: Arc<dyn ITelemetryStore>,
        evaluator: Evaluator,
        config: EvaluationConfig,
    ) -> Self {
        let writer = config
            .telemetry_enabled
            .then(|| TelemetryWriter::spawn(Arc::clone(&store), evaluator.clone()));
        Self {
            store,
            evaluator,
            writer,
            config,
        }
    }

    /// Score a result list against ground truth, synchronously.
    pub fn evaluate(
        &self,
        query_text: &str,
        results: &[RankedResult],
        relevant: &BTreeSet<CandidateId>,
    ) -> EvaluationMetrics {
        self.evaluator.evaluate(query_text, results, relevant)
    }

    /// Enqueue a completed search for telemetry.
    pub fn record(&self, search: CompletedSearch) {
        match &self.writer {
            Some(writer) => writer.record(search),
            None => debug!(query_id = %search.query_id, "telemetry disabled, search not recorded"),
        }
    }

    /// Attach user feedback to a past query. Never fails; an unknown query id
    /// is left to the store's merge policy.
    pub fn submit_feedback(&self, query_id: QueryId, feedback: UserFeedback) {
        match &self.writer {
            Some(writer) => writer.feedback(query_id, feedback),
            None => debug!(query_id = %query_id, "telemetry disabled, feedback not recorded"),
        }
    }

    pub fn metrics_for(&self, query_id: &QueryId) -> TalentResult<Option<SearchMetrics>> {
        self.store.get(query_id)
    }

    /// Aggregate the telemetry of the last `window_hours`.
    pub fn performance_analytics(&self, window_hours: u32) -> TalentResult<PerformanceAnalytics> {
        PerformanceAnalytics::compute(self.store.as_ref(), window_hours, Utc::now())
    }

    /// Analytics over the configured `analytics_window_hours`.
    pub fn recent_analytics(&self) -> TalentResult<PerformanceAnalytics> {
        self.performance_analytics(self.config.analytics_window_hours)
    }

    /// Recommendations over the configured recommendation window. A store
    /// failure becomes a single critical recommendation.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        match self.performance_analytics(self.config.recommendation_window_hours) {
            Ok(analytics) => recommend(&analytics, &self.config),
            Err(e) => {
                warn!(error = %e, "analytics unavailable");
                vec![Recommendation {
                    severity: Severity::Critical,
                    message: format!("Unable to analyse search telemetry: {e}"),
                    action: "Check the telemetry store".to_string(),
                }]
            }
        }
    }

    /// Wait for queued telemetry to be written.
    pub fn flush(&self) {
        if let Some(writer) = &self.writer {
            writer.flush();
        }
    }

    /// Drain the writer and stop it.
    pub fn finish(self) -> WriterStats {
        self.writer.map(TelemetryWriter::finish).unwrap_or_default()
    }
}

impl ISearchObserver for EvaluationService {
    fn on_search_completed(&self, search: CompletedSearch) {
        self.record(search);
    }
}
