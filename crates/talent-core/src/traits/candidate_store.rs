use std::sync::Arc;

use crate::errors::TalentResult;
use crate::models::{
    CandidateId, CandidateRecord, EmbeddingField, FilterExpr, KeywordQuery, StoreStats,
};

/// Read-only candidate repository used by both search engines.
pub trait ICandidateStore: Send + Sync {
    /// Candidates with `field` embedded and matching `filter`, ordered by
    /// descending cosine similarity, ties by ascending id.
    fn query_by_vector_similarity(
        &self,
        field: EmbeddingField,
        query_vector: &[f32],
        filter: &FilterExpr,
        limit: usize,
    ) -> TalentResult<Vec<(Arc<CandidateRecord>, f64)>>;

    /// Candidates matching any keyword or skill token and `filter`, by ascending id.
    fn query_by_keyword(
        &self,
        query: &KeywordQuery,
        filter: &FilterExpr,
        limit: usize,
    ) -> TalentResult<Vec<Arc<CandidateRecord>>>;

    fn get(&self, id: CandidateId) -> TalentResult<Option<Arc<CandidateRecord>>>;

    fn stats(&self) -> TalentResult<StoreStats>;
}
