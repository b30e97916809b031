use serde::{Deserialize, Serialize};

use super::candidate::CandidateId;
use super::context_chunk::ContextChunk;
use super::query::{QueryId, SearchRequest};
use super::scored::{RetrievalMethod, ScoredCandidate};

/// Where a result's rerank score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RerankSource {
    Model,
    /// Model unavailable or reply unusable; score is the match score.
    Fallback,
    /// Reranking disabled by configuration.
    Skipped,
}

/// Human label for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchQuality {
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            Self::Excellent
        } else if score > 0.6 {
            Self::Good
        } else if score > 0.4 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// Terminal output of the pipeline for one candidate.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    pub scored: ScoredCandidate,
    /// Fused rank score, when the candidate went through fusion.
    pub rrf_score: Option<f64>,
    pub chunks: Vec<ContextChunk>,
    pub rerank_score: f64,
    pub explanation: String,
    pub source: RerankSource,
    pub match_quality: MatchQuality,
}

impl RankedResult {
    pub fn id(&self) -> CandidateId {
        self.scored.id()
    }
}

/// A stage that degraded instead of failing the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Degradation {
    pub component: String,
    pub failure: String,
    pub fallback: String,
}

/// Counts reported by the candidate store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_candidates: usize,
    pub candidates_with_embeddings: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchSummary {
    pub total: usize,
    pub average_match_score: f64,
    pub excellent_matches: usize,
    pub good_matches: usize,
    pub store: Option<StoreStats>,
}

impl SearchSummary {
    pub fn from_results(results: &[RankedResult], store: Option<StoreStats>) -> Self {
        let total = results.len();
        let average_match_score = if total == 0 {
            0.0
        } else {
            results.iter().map(|r| r.scored.match_score).sum::<f64>() / total as f64
        };
        Self {
            total,
            average_match_score,
            excellent_matches: results.iter().filter(|r| r.scored.match_score > 0.8).count(),
            good_matches: results.iter().filter(|r| r.scored.match_score > 0.6).count(),
            store,
        }
    }
}

/// Result object returned for every search, including failed ones.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query_id: Option<QueryId>,
    pub error: bool,
    pub message: String,
    pub criteria: SearchRequest,
    pub summary: SearchSummary,
    pub results: Vec<RankedResult>,
    pub method: Option<RetrievalMethod>,
    pub degradations: Vec<Degradation>,
    pub elapsed_ms: u64,
}

impl SearchOutcome {
    /// Error result carrying the original criteria and no candidates.
    pub fn failure(criteria: SearchRequest, message: impl Into<String>) -> Self {
        Self {
            query_id: None,
            error: true,
            message: message.into(),
            criteria,
            summary: SearchSummary::default(),
            results: Vec::new(),
            method: None,
            degradations: Vec::new(),
            elapsed_ms: 0,
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}
