//! Multi-field vector search.
//!
//! The job description is embedded by aspect, each embedding field is
//! queried independently, and the per-field hits are merged into one
//! composite-scored list.

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use talent_core::config::SearchConfig;
use talent_core::errors::{EmbeddingError, TalentResult};
use talent_core::models::{
    CandidateId, CandidateRecord, EmbeddingField, FieldWeights, FilterExpr, RetrievalMethod,
    ScoredCandidate, SearchQuery, SubScores,
};
use talent_core::similarity::cosine_similarity;
use talent_core::traits::{ICandidateStore, IEmbeddingProvider};
use tracing::debug;

use super::query_aspects;

/// The query embeddings compared against stored candidate fields.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEmbeddings {
    pub full: Vec<f32>,
    pub skills: Vec<f32>,
}

impl QueryEmbeddings {
    /// Query vector paired with a stored field. Only the skills field is
    /// compared against the skills section; every other field sees the
    /// full job description.
    pub fn for_field(&self, field: EmbeddingField) -> &[f32] {
        match field {
            EmbeddingField::Skills => &self.skills,
            EmbeddingField::Profile | EmbeddingField::Experience | EmbeddingField::Resume => {
                &self.full
            }
        }
    }
}

pub struct VectorSearchEngine {
    store: Arc<dyn ICandidateStore>,
    embedder: Arc<dyn IEmbeddingProvider>,
    weights: FieldWeights,
    pool_size: usize,
}

/// Per-candidate accumulator while merging field hits.
struct Merged {
    candidate: Arc<CandidateRecord>,
    scores: SubScores,
    seen: [bool; 4],
}

fn field_slot(field: EmbeddingField) -> usize {
    match field {
        EmbeddingField::Profile => 0,
        EmbeddingField::Skills => 1,
        EmbeddingField::Experience => 2,
        EmbeddingField::Resume => 3,
    }
}

impl VectorSearchEngine {
    pub fn new(
        store: Arc<dyn ICandidateStore>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: &SearchConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            weights: config.weights,
            pool_size: config.field_pool_size,
        }
    }

    /// Embed the full text and the skills section in one batch.
    pub fn embed_query(&self, job_description: &str) -> TalentResult<QueryEmbeddings> {
        let texts = vec![
            job_description.to_string(),
            query_aspects::skills_section(job_description),
        ];
        let mut vectors = self.embedder.embed_batch(&texts)?.into_iter();
        match (vectors.next(), vectors.next()) {
            (Some(full), Some(skills)) => Ok(QueryEmbeddings { full, skills }),
            _ => Err(EmbeddingError::InvalidResponse {
                reason: "expected 2 query embeddings".to_string(),
            }
            .into()),
        }
    }

    /// Embed the query and search. Embedding failures are returned to the
    /// caller, which decides whether to degrade to keyword search.
    pub fn search(&self, query: &SearchQuery, limit: usize) -> TalentResult<Vec<ScoredCandidate>> {
        let embeddings = self.embed_query(query.job_description())?;
        self.search_with_embeddings(&embeddings, &query.filters().to_expr(), limit)
    }

    /// Search with precomputed query embeddings.
    ///
    /// Candidates missing any required embedding are excluded. Output is
    /// ordered by composite score descending, ties by ascending id.
    pub fn search_with_embeddings(
        &self,
        embeddings: &QueryEmbeddings,
        filter: &FilterExpr,
        limit: usize,
    ) -> TalentResult<Vec<ScoredCandidate>> {
        let mut clauses = vec![filter.clone()];
        clauses.extend(EmbeddingField::REQUIRED.iter().map(|f| FilterExpr::HasEmbedding(*f)));
        let filter = FilterExpr::all(clauses);

        let per_field: Vec<(EmbeddingField, Vec<(Arc<CandidateRecord>, f64)>)> =
            EmbeddingField::ALL
                .par_iter()
                .map(|field| {
                    self.store
                        .query_by_vector_similarity(
                            *field,
                            embeddings.for_field(*field),
                            &filter,
                            self.pool_size,
                        )
                        .map(|hits| (*field, hits))
                })
                .collect::<TalentResult<_>>()?;

        let mut merged: BTreeMap<CandidateId, Merged> = BTreeMap::new();
        for (field, hits) in per_field {
            for (candidate, similarity) in hits {
                let entry = merged.entry(candidate.id).or_insert_with(|| Merged {
                    candidate: Arc::clone(&candidate),
                    scores: SubScores::default(),
                    seen: [false; 4],
                });
                entry.scores.set_field(field, similarity);
                entry.seen[field_slot(field)] = true;
            }
        }

        let mut results: Vec<ScoredCandidate> = merged
            .into_values()
            .map(|mut m| {
                // A candidate outside one field's pool still gets that field's similarity.
                for field in EmbeddingField::ALL {
                    if !m.seen[field_slot(field)] {
                        let sim = m
                            .candidate
                            .embedding(field)
                            .map(|stored| cosine_similarity(embeddings.for_field(field), stored))
                            .unwrap_or(0.0);
                        m.scores.set_field(field, sim);
                    }
                }
                ScoredCandidate {
                    match_score: self.weights.composite(&m.scores),
                    candidate: m.candidate,
                    sub_scores: m.scores,
                    method: RetrievalMethod::Vector,
                }
            })
            .collect();

        results.sort_by(ScoredCandidate::rank_order);
        results.truncate(limit);

        debug!(results = results.len(), pool = self.pool_size, "vector search complete");
        Ok(results)
    }
}
