//! In-memory candidate store with brute-force cosine search.
//!
//! Holds records sorted by id so every query result has a deterministic
//! order. Suitable for tests, demos, and pools up to a few hundred
//! thousand candidates.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use talent_core::errors::{SearchError, TalentError, TalentResult};
use talent_core::models::{
    CandidateId, CandidateRecord, EmbeddingField, FilterExpr, KeywordQuery, StoreStats,
};
use talent_core::similarity::cosine_similarity;
use talent_core::traits::ICandidateStore;
use tracing::debug;

pub struct MemoryCandidateStore {
    candidates: Vec<Arc<CandidateRecord>>,
}

impl MemoryCandidateStore {
    /// Build a store. Later records replace earlier ones with the same id.
    pub fn new(records: Vec<CandidateRecord>) -> Self {
        let mut candidates: Vec<Arc<CandidateRecord>> =
            records.into_iter().rev().map(Arc::new).collect();
        candidates.sort_by_key(|c| c.id);
        candidates.dedup_by_key(|c| c.id);
        Self { candidates }
    }

    /// Load a JSON array of candidate records.
    pub fn from_json(json: &str) -> TalentResult<Self> {
        let records: Vec<CandidateRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    pub fn from_file(path: &Path) -> TalentResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            TalentError::from(SearchError::StoreUnavailable {
                reason: format!("{}: {e}", path.display()),
            })
        })?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl ICandidateStore for MemoryCandidateStore {
    fn query_by_vector_similarity(
        &self,
        field: EmbeddingField,
        query_vector: &[f32],
        filter: &FilterExpr,
        limit: usize,
    ) -> TalentResult<Vec<(Arc<CandidateRecord>, f64)>> {
        let mut hits: Vec<(Arc<CandidateRecord>, f64)> = self
            .candidates
            .par_iter()
            .filter(|c| filter.matches(c))
            .filter_map(|c| {
                c.embedding(field)
                    .map(|stored| (Arc::clone(c), cosine_similarity(query_vector, stored)))
            })
            .collect();

        hits.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.id.cmp(&b.0.id))
        });
        hits.truncate(limit);

        debug!(field = field.as_str(), hits = hits.len(), "vector scan complete");
        Ok(hits)
    }

    fn query_by_keyword(
        &self,
        query: &KeywordQuery,
        filter: &FilterExpr,
        limit: usize,
    ) -> TalentResult<Vec<Arc<CandidateRecord>>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .candidates
            .iter()
            .filter(|c| filter.matches(c) && query.matches(c))
            .take(limit)
            .cloned()
            .collect())
    }

    fn get(&self, id: CandidateId) -> TalentResult<Option<Arc<CandidateRecord>>> {
        Ok(self
            .candidates
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|i| Arc::clone(&self.candidates[i])))
    }

    fn stats(&self) -> TalentResult<StoreStats> {
        Ok(StoreStats {
            total_candidates: self.candidates.len(),
            candidates_with_embeddings: self
                .candidates
                .iter()
                .filter(|c| c.embeddings.has_required())
                .count(),
        })
    }
}
