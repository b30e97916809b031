//! SearchPipeline: orchestrates the full retrieval pipeline.
//!
//! validate → {vector ∥ keyword} → RRF → context → rerank → summary.
//!
//! Mandatory stages are validation and at least one search engine. Every
//! other failure is recorded as a degradation on the outcome.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use talent_core::config::TalentConfig;
use talent_core::errors::{SearchError, TalentError, TalentResult};
use talent_core::models::{
    CandidateId, CompletedSearch, ContextChunk, Degradation, KeywordHit, RankedResult,
    RetrievalMethod, ScoredCandidate, SearchOutcome, SearchQuery, SearchRequest, SearchSummary,
};
use talent_core::traits::{ICandidateStore, IEmbeddingProvider, IRerankerModel, ISearchObserver};
use tracing::{debug, info, warn};

use crate::context::{self, ContextBuilder, ContextQuality};
use crate::ranking::Reranker;
use crate::search::{FusionEngine, KeywordSearchEngine, VectorSearchEngine};

pub struct SearchPipeline {
    store: Arc<dyn ICandidateStore>,
    embedder: Arc<dyn IEmbeddingProvider>,
    vector: VectorSearchEngine,
    keyword: KeywordSearchEngine,
    fusion: FusionEngine,
    context: ContextBuilder,
    reranker: Reranker,
    observer: Option<Arc<dyn ISearchObserver>>,
    config: TalentConfig,
}

impl SearchPipeline {
    pub fn new(
        store: Arc<dyn ICandidateStore>,
        embedder: Arc<dyn IEmbeddingProvider>,
        reranker_model: Option<Arc<dyn IRerankerModel>>,
        config: TalentConfig,
    ) -> Self {
        Self {
            vector: VectorSearchEngine::new(Arc::clone(&store), Arc::clone(&embedder), &config.search),
            keyword: KeywordSearchEngine::new(Arc::clone(&store), &config.search),
            fusion: FusionEngine::new(config.search.rrf_k),
            context: ContextBuilder::new(),
            reranker: Reranker::new(reranker_model, &config.rerank),
            observer: None,
            store,
            embedder,
            config,
        }
    }

    /// Notify `observer` after every completed search.
    pub fn with_observer(mut self, observer: Arc<dyn ISearchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &TalentConfig {
        &self.config
    }

    /// Validate raw criteria and search. An empty job description yields an
    /// error outcome carrying the criteria; no engine runs.
    pub fn search_request(&self, request: SearchRequest) -> SearchOutcome {
        match SearchQuery::try_from(request.clone()) {
            Ok(query) => self.search(&query),
            Err(e) => {
                warn!(error = %e, "rejected search request");
                SearchOutcome::failure(request, e.to_string())
            }
        }
    }

    pub fn search(&self, query: &SearchQuery) -> SearchOutcome {
        self.run(query, None)
    }

    /// Search with a known relevant set, forwarded to the observer for
    /// precision and recall.
    pub fn search_labeled(
        &self,
        query: &SearchQuery,
        relevant: BTreeSet<CandidateId>,
    ) -> SearchOutcome {
        self.run(query, Some(relevant))
    }

    fn run(&self, query: &SearchQuery, relevant: Option<BTreeSet<CandidateId>>) -> SearchOutcome {
        let started = Instant::now();
        let limit = query.max_results_or(self.config.search.max_results);
        let hybrid = query.hybrid_or(self.config.search.hybrid);
        let mut degradations = Vec::new();

        // Stage 1: candidate retrieval.
        let (vector, keyword) = if hybrid {
            rayon::join(
                || self.vector.search(query, limit),
                || self.keyword.search(query, limit),
            )
        } else {
            let vector = self.vector.search(query, limit);
            let keyword = match &vector {
                Err(_) => self.keyword.search(query, limit),
                Ok(_) => Ok(Vec::new()),
            };
            (vector, keyword)
        };

        let (vector, keyword, method) = match resolve(vector, keyword, hybrid, &mut degradations) {
            Ok(lists) => lists,
            Err(e) => {
                warn!(query_id = %query.id(), error = %e, "search failed");
                let mut outcome = SearchOutcome::failure(query.to_request(), e.to_string());
                outcome.query_id = Some(query.id().clone());
                outcome.degradations = degradations;
                outcome.elapsed_ms = started.elapsed().as_millis() as u64;
                return outcome;
            }
        };

        // Stage 2: rank fusion.
        let keyword_scored: Vec<ScoredCandidate> =
            keyword.into_iter().map(|hit| hit.scored).collect();
        let fused = self.fusion.fuse(&vector, &keyword_scored);
        debug!(
            vector = vector.len(),
            keyword = keyword_scored.len(),
            fused = fused.len(),
            "fusion complete"
        );

        // Stage 3: context and rerank.
        let chunks = self.context.build_all(&fused);
        let (results, rerank_degradation) = self.reranker.rerank(
            query.job_description(),
            fused.into_iter().zip(chunks).collect(),
            limit,
        );
        degradations.extend(rerank_degradation);

        let stats = match self.store.stats() {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(error = %e, "candidate store stats unavailable");
                None
            }
        };
        let summary = SearchSummary::from_results(&results, stats);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        info!(
            query_id = %query.id(),
            method = method.as_str(),
            results = results.len(),
            degraded = !degradations.is_empty(),
            elapsed_ms,
            "search complete"
        );

        if let Some(observer) = &self.observer {
            observer.on_search_completed(CompletedSearch {
                query_id: query.id().clone(),
                query_text: query.job_description().to_string(),
                method,
                response_time_ms: elapsed_ms,
                results: results.clone(),
                degradations: degradations.clone(),
                relevant,
            });
        }

        SearchOutcome {
            query_id: Some(query.id().clone()),
            error: false,
            message: if results.is_empty() {
                "No matching candidates found".to_string()
            } else {
                format!("Found {} matching candidates", results.len())
            },
            criteria: query.to_request(),
            summary,
            results,
            method: Some(method),
            degradations,
            elapsed_ms,
        }
    }

    /// Natural-language summary of one result.
    pub fn summarize(&self, query: &SearchQuery, result: &RankedResult) -> String {
        self.reranker
            .enhanced_summary(query.job_description(), &result.scored.candidate, &result.chunks)
    }

    /// Re-score a result's chunks against the query and fit them to the
    /// configured token budget.
    pub fn optimize_context(&self, query: &SearchQuery, chunks: &[ContextChunk]) -> Vec<ContextChunk> {
        context::optimize_context(
            chunks,
            query.job_description(),
            self.embedder.as_ref(),
            self.config.rerank.context_token_budget,
        )
    }

    pub fn assess_context(&self, result: &RankedResult) -> ContextQuality {
        context::assess_quality(&result.chunks)
    }
}

/// Apply the degradation rules to the two engine results.
///
/// A failed engine degrades to the other one; both failing is fatal.
fn resolve(
    vector: TalentResult<Vec<ScoredCandidate>>,
    keyword: TalentResult<Vec<KeywordHit>>,
    hybrid: bool,
    degradations: &mut Vec<Degradation>,
) -> TalentResult<(Vec<ScoredCandidate>, Vec<KeywordHit>, RetrievalMethod)> {
    match (vector, keyword) {
        (Ok(v), Ok(k)) => {
            let method = if hybrid {
                RetrievalMethod::Hybrid
            } else {
                RetrievalMethod::Vector
            };
            Ok((v, k, method))
        }
        (Err(ve), Ok(k)) => {
            warn!(error = %ve, "vector search unavailable, degrading to keyword search");
            degradations.push(Degradation {
                component: "vector_search".to_string(),
                failure: ve.to_string(),
                fallback: "keyword search only".to_string(),
            });
            Ok((Vec::new(), k, RetrievalMethod::Keyword))
        }
        (Ok(v), Err(ke)) => {
            warn!(error = %ke, "keyword search failed, using vector results only");
            degradations.push(Degradation {
                component: "keyword_search".to_string(),
                failure: ke.to_string(),
                fallback: "vector search only".to_string(),
            });
            Ok((v, Vec::new(), RetrievalMethod::Vector))
        }
        (Err(ve), Err(ke)) => Err(TalentError::from(SearchError::BothEnginesFailed {
            vector: ve.to_string(),
            keyword: ke.to_string(),
        })),
    }
}
