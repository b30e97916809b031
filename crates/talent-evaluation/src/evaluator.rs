//! Turns a completed search into a telemetry record.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use rayon::prelude::*;
use talent_core::errors::TalentResult;
use talent_core::models::{
    CandidateId, CandidateRecord, CompletedSearch, EvaluationMetrics, RankedResult, SearchMetrics,
};
use talent_core::similarity::cosine_similarity;
use talent_core::traits::IEmbeddingProvider;
use tracing::warn;

use crate::classify::classify_query;
use crate::metrics;

/// Computes evaluation metrics. Context relevancy needs an embedder and is
/// reported as 0 without one.
#[derive(Clone, Default)]
pub struct Evaluator {
    embedder: Option<Arc<dyn IEmbeddingProvider>>,
}

impl Evaluator {
    pub fn new(embedder: Arc<dyn IEmbeddingProvider>) -> Self {
        Self {
            embedder: Some(embedder),
        }
    }

    pub fn without_embeddings() -> Self {
        Self::default()
    }

    pub fn evaluate(
        &self,
        query_text: &str,
        results: &[RankedResult],
        relevant: &BTreeSet<CandidateId>,
    ) -> EvaluationMetrics {
        let retrieved: Vec<CandidateId> = results.iter().map(RankedResult::id).collect();
        let precision = metrics::precision(&retrieved, relevant);
        let recall = metrics::recall(&retrieved, relevant);
        let candidates: Vec<&CandidateRecord> =
            results.iter().map(|r| r.scored.candidate.as_ref()).collect();

        EvaluationMetrics {
            precision,
            recall,
            f1: metrics::f1(precision, recall),
            diversity: metrics::diversity(&candidates),
            context_relevancy: self.context_relevancy(query_text, results),
            average_match_score: average_match_score(results),
            top_result_score: top_result_score(results),
        }
    }

    /// Mean cosine similarity between the query and each candidate's
    /// synthesized context. Any embedding failure yields 0.
    pub fn context_relevancy(&self, query_text: &str, results: &[RankedResult]) -> f64 {
        let Some(embedder) = &self.embedder else {
            return 0.0;
        };
        if results.is_empty() {
            return 0.0;
        }
        match relevancies(embedder.as_ref(), query_text, results) {
            Ok(scores) => metrics::mean(&scores),
            Err(e) => {
                warn!(error = %e, "context relevancy unavailable");
                0.0
            }
        }
    }

    /// Build the telemetry record. Evaluation is attached only when the
    /// search carried a relevant set.
    pub fn to_metrics(&self, search: &CompletedSearch) -> SearchMetrics {
        SearchMetrics {
            query_id: search.query_id.clone(),
            query_text: search.query_text.clone(),
            query_type: classify_query(&search.query_text),
            method: search.method,
            result_count: search.results.len(),
            average_match_score: average_match_score(&search.results),
            top_match_score: top_result_score(&search.results),
            response_time_ms: search.response_time_ms,
            evaluation: search
                .relevant
                .as_ref()
                .map(|rel| self.evaluate(&search.query_text, &search.results, rel)),
            feedback: None,
            created_at: Utc::now(),
        }
    }
}

fn relevancies(
    embedder: &dyn IEmbeddingProvider,
    query_text: &str,
    results: &[RankedResult],
) -> TalentResult<Vec<f64>> {
    let query = embedder.embed(query_text)?;
    results
        .par_iter()
        .map(|r| {
            let context = embedder.embed(&candidate_context(&r.scored.candidate))?;
            Ok(cosine_similarity(&query, &context))
        })
        .collect()
}

/// Short text standing in for the candidate when scoring context relevancy.
pub fn candidate_context(c: &CandidateRecord) -> String {
    format!(
        "{} at {}. Skills: {}. Experience: {} years. {}",
        c.title,
        c.company_or_unknown(),
        c.skills.join(", "),
        c.years_experience,
        c.resume_text().unwrap_or_default()
    )
    .trim_end()
    .to_string()
}

fn average_match_score(results: &[RankedResult]) -> f64 {
    let scores: Vec<f64> = results.iter().map(|r| r.scored.match_score).collect();
    metrics::mean(&scores)
}

fn top_result_score(results: &[RankedResult]) -> f64 {
    results.first().map_or(0.0, |r| r.scored.match_score)
}
