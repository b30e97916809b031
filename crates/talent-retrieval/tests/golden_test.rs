//! Golden scenario tests for talent-retrieval.
//!
//! Seeds an in-memory store from the fixture candidate pool, embedding
//! every field with a small closed-vocabulary embedder so similarities
//! are exact and explainable, then runs the pipeline end to end.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use talent_core::config::TalentConfig;
use talent_core::constants::RERANK_FALLBACK_EXPLANATION;
use talent_core::errors::{EmbeddingError, RerankError, TalentResult};
use talent_core::models::{
    CandidateId, CandidateRecord, CompletedSearch, EmbeddingField, RerankSource, RetrievalMethod,
    SearchFilters, SearchQuery,
};
use talent_core::traits::{IEmbeddingProvider, IRerankerModel, ISearchObserver};
use talent_retrieval::search::FusionEngine;
use talent_retrieval::{KeywordSearchEngine, SearchPipeline, VectorSearchEngine};
use talent_storage::MemoryCandidateStore;
use test_fixtures::{load_fixture, load_fixture_value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const VOCAB: &[&str] = &[
    "senior", "junior", "staff", "lead", "frontend", "backend", "developer", "engineer",
    "react", "aws", "typescript", "javascript", "python", "rust", "kafka", "django", "docker",
    "kubernetes", "apis", "data", "mobile",
];

/// Bag-of-words over a fixed vocabulary plus a constant bias dimension.
struct VocabEmbedder;

impl IEmbeddingProvider for VocabEmbedder {
    fn embed(&self, text: &str) -> TalentResult<Vec<f32>> {
        let mut v = vec![0.0f32; VOCAB.len() + 1];
        v[0] = 1.0;
        for token in text.split(|c: char| !c.is_alphanumeric()) {
            let token = token.to_lowercase();
            if let Some(i) = VOCAB.iter().position(|w| *w == token) {
                v[i + 1] += 1.0;
            }
        }
        Ok(v)
    }
    fn dimensions(&self) -> usize {
        VOCAB.len() + 1
    }
    fn name(&self) -> &str {
        "vocab"
    }
    fn is_available(&self) -> bool {
        true
    }
}

struct DownEmbedder;

impl IEmbeddingProvider for DownEmbedder {
    fn embed(&self, _text: &str) -> TalentResult<Vec<f32>> {
        Err(EmbeddingError::Unavailable {
            provider: "down".into(),
            reason: "connection refused".into(),
        }
        .into())
    }
    fn dimensions(&self) -> usize {
        VOCAB.len() + 1
    }
    fn name(&self) -> &str {
        "down"
    }
    fn is_available(&self) -> bool {
        false
    }
}

struct FailingModel;

impl IRerankerModel for FailingModel {
    fn score(&self, _prompt: &str) -> TalentResult<String> {
        Err(RerankError::Provider {
            reason: "503 Service Unavailable".into(),
        }
        .into())
    }
    fn name(&self) -> &str {
        "failing"
    }
}

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<CompletedSearch>>,
}

impl ISearchObserver for Recorder {
    fn on_search_completed(&self, search: CompletedSearch) {
        self.seen.lock().unwrap().push(search);
    }
}

fn embedded_pool(only: Option<&[u64]>) -> Vec<CandidateRecord> {
    let pool: Vec<CandidateRecord> = load_fixture("candidates/pool.json");
    pool.into_iter()
        .filter(|c| only.map_or(true, |ids| ids.contains(&c.id.0)))
        .map(|mut c| {
            let e = VocabEmbedder;
            let texts = [
                (EmbeddingField::Profile, c.title.clone()),
                (EmbeddingField::Skills, c.skills.join(", ")),
                (
                    EmbeddingField::Experience,
                    format!("{} {} years", c.title, c.years_experience),
                ),
            ];
            for (field, text) in texts {
                c.embeddings.set(field, e.embed(&text).unwrap());
            }
            if let Some(resume) = c.resume_text().map(str::to_string) {
                c.embeddings.set(EmbeddingField::Resume, e.embed(&resume).unwrap());
            }
            c
        })
        .collect()
}

fn candidate_ids(fixture: &Value) -> Option<Vec<u64>> {
    fixture["input"]["candidate_ids"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_u64).collect())
}

fn store_for(fixture: &Value) -> Arc<MemoryCandidateStore> {
    let ids = candidate_ids(fixture);
    Arc::new(MemoryCandidateStore::new(embedded_pool(ids.as_deref())))
}

fn pipeline(store: Arc<MemoryCandidateStore>) -> SearchPipeline {
    SearchPipeline::new(store, Arc::new(VocabEmbedder), None, TalentConfig::default())
}

fn ids(results: &[talent_core::models::RankedResult]) -> Vec<u64> {
    results.iter().map(|r| r.id().0).collect()
}

// ---------------------------------------------------------------------------
// Golden scenarios
// ---------------------------------------------------------------------------

#[test]
fn golden_react_aws_ranks_experienced_engineer_first() {
    let fixture = load_fixture_value("golden/retrieval/react_aws.json");
    let jd = fixture["input"]["job_description"].as_str().unwrap();
    let store = store_for(&fixture);
    let config = TalentConfig::default();

    let vector = VectorSearchEngine::new(store.clone(), Arc::new(VocabEmbedder), &config.search);
    let query = SearchQuery::new(jd).unwrap();
    let v = vector.search(&query, 10).unwrap();
    assert_eq!(v[0].id(), CandidateId(1));
    assert!(v[0].sub_scores.skills > v[1].sub_scores.skills);
    assert!(v[0].match_score > v[1].match_score);

    let keyword = KeywordSearchEngine::new(store.clone(), &config.search);
    let expected_skills: Vec<String> = fixture["expected"]["keyword_skills"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect();
    assert_eq!(keyword.extract(jd).skill_tokens, expected_skills);

    let out = pipeline(store).search(&query);
    let expected: Vec<u64> = fixture["expected"]["order"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_u64)
        .collect();
    assert!(!out.error);
    assert_eq!(ids(&out.results), expected);
    assert_eq!(out.method, Some(RetrievalMethod::Hybrid));
    assert_eq!(out.results[0].scored.method, RetrievalMethod::Hybrid);
    assert!(out.results.iter().all(|r| !r.chunks.is_empty()));
}

#[test]
fn golden_no_keywords_fusion_follows_vector_ranking() {
    let fixture = load_fixture_value("golden/retrieval/no_keywords.json");
    let jd = fixture["input"]["job_description"].as_str().unwrap();
    let store = store_for(&fixture);
    let config = TalentConfig::default();
    let query = SearchQuery::new(jd).unwrap();

    let keyword = KeywordSearchEngine::new(store.clone(), &config.search);
    let hits = keyword.search(&query, 10).unwrap();
    assert_eq!(
        hits.len() as u64,
        fixture["expected"]["keyword_results"].as_u64().unwrap()
    );

    let vector = VectorSearchEngine::new(store.clone(), Arc::new(VocabEmbedder), &config.search);
    let v = vector.search(&query, 10).unwrap();
    let fused = FusionEngine::new(config.search.rrf_k).fuse(&v, &[]);
    let vector_order: Vec<u64> = v.iter().map(|c| c.id().0).collect();
    let fused_order: Vec<u64> = fused.iter().map(|c| c.id().0).collect();
    assert_eq!(fused_order, vector_order);

    let out = pipeline(store).search(&query);
    assert_eq!(ids(&out.results), vector_order);
}

#[test]
fn golden_filters_apply_band_and_location() {
    let fixture = load_fixture_value("golden/retrieval/filters.json");
    let jd = fixture["input"]["job_description"].as_str().unwrap();
    let filters: SearchFilters =
        serde_json::from_value(fixture["input"]["filters"].clone()).unwrap();
    let store = store_for(&fixture);

    let query = SearchQuery::new(jd).unwrap().with_filters(filters);
    let out = pipeline(store).search(&query);

    let got: BTreeSet<u64> = ids(&out.results).into_iter().collect();
    let expected: BTreeSet<u64> = fixture["expected"]["ids"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_u64)
        .collect();
    assert_eq!(got, expected);
}

// ---------------------------------------------------------------------------
// Degradation and determinism
// ---------------------------------------------------------------------------

#[test]
fn embedding_outage_still_returns_keyword_results() {
    let store = Arc::new(MemoryCandidateStore::new(embedded_pool(None)));
    let p = SearchPipeline::new(store.clone(), Arc::new(DownEmbedder), None, TalentConfig::default());
    let query = SearchQuery::new("Senior React developer with AWS experience").unwrap();

    let out = p.search(&query);
    assert!(!out.error);
    assert!(out.is_degraded());
    assert_eq!(out.method, Some(RetrievalMethod::Keyword));

    let keyword = KeywordSearchEngine::new(store, &TalentConfig::default().search);
    let expected: Vec<u64> = keyword
        .search(&query, 10)
        .unwrap()
        .iter()
        .map(|h| h.scored.id().0)
        .collect();
    assert_eq!(ids(&out.results), expected);
    assert!(out
        .results
        .iter()
        .all(|r| r.scored.method == RetrievalMethod::Keyword));
}

#[test]
fn reranker_failure_keeps_match_score() {
    let store = Arc::new(MemoryCandidateStore::new(embedded_pool(None)));
    let p = SearchPipeline::new(
        store,
        Arc::new(VocabEmbedder),
        Some(Arc::new(FailingModel)),
        TalentConfig::default(),
    );
    let out = p.search(&SearchQuery::new("Backend engineer with Rust and Kafka").unwrap());

    assert!(!out.results.is_empty());
    for r in &out.results {
        assert_eq!(r.source, RerankSource::Fallback);
        assert_eq!(r.rerank_score, r.scored.match_score);
        assert_eq!(r.explanation, RERANK_FALLBACK_EXPLANATION);
    }
    assert!(out.degradations.iter().any(|d| d.component == "reranker"));
}

#[test]
fn without_reranking_output_follows_rrf_order() {
    // Candidate 1 is found by both engines. Candidate 2 has no embeddings,
    // so it is keyword-only, but its keyword score clamps to 1.0.
    let mut both: CandidateRecord = serde_json::from_value(serde_json::json!({
        "id": 1,
        "name": "Elena Garcia",
        "title": "Backend Developer",
        "skills": ["Rust"],
    }))
    .unwrap();
    for (field, text) in [
        (EmbeddingField::Profile, "Backend Developer"),
        (EmbeddingField::Skills, "Rust"),
        (EmbeddingField::Experience, "Backend Developer 8 years"),
    ] {
        both.embeddings.set(field, VocabEmbedder.embed(text).unwrap());
    }
    let keyword_only: CandidateRecord = serde_json::from_value(serde_json::json!({
        "id": 2,
        "name": "Tom Becker",
        "title": "Rust Kafka Engineer",
        "summary": "Senior engineer writing Rust services on Kafka.",
        "skills": ["Rust", "Kafka"],
    }))
    .unwrap();
    let store = Arc::new(MemoryCandidateStore::new(vec![both, keyword_only]));
    let query = SearchQuery::new("Senior Rust engineer with Kafka").unwrap();

    for config in [
        TalentConfig::default(),
        {
            let mut c = TalentConfig::default();
            c.rerank.enabled = false;
            c
        },
    ] {
        let p = SearchPipeline::new(store.clone(), Arc::new(VocabEmbedder), None, config);
        let out = p.search(&query);
        assert_eq!(ids(&out.results), vec![1, 2]);

        let first = &out.results[0];
        let second = &out.results[1];
        assert_eq!(first.scored.method, RetrievalMethod::Hybrid);
        assert_eq!(second.scored.method, RetrievalMethod::Keyword);
        assert!(first.rrf_score > second.rrf_score);
        assert!(first.scored.match_score < second.scored.match_score);
        assert!(out.results.iter().all(|r| r.source == RerankSource::Skipped));
    }

    // A reranker that fails for everyone keeps the same order.
    let p = SearchPipeline::new(
        store,
        Arc::new(VocabEmbedder),
        Some(Arc::new(FailingModel)),
        TalentConfig::default(),
    );
    assert_eq!(ids(&p.search(&query).results), vec![1, 2]);
}

#[test]
fn same_query_twice_is_identical() {
    let store = Arc::new(MemoryCandidateStore::new(embedded_pool(None)));
    let p = pipeline(store);
    let query = SearchQuery::new("Senior backend engineer, Python or Rust, Docker").unwrap();

    let a = p.search(&query);
    let b = p.search(&query);
    assert_eq!(ids(&a.results), ids(&b.results));
    let scores = |o: &talent_core::models::SearchOutcome| -> Vec<(f64, f64)> {
        o.results
            .iter()
            .map(|r| (r.rerank_score, r.rrf_score.unwrap_or_default()))
            .collect()
    };
    assert_eq!(scores(&a), scores(&b));
}

#[test]
fn observer_sees_every_completed_search() {
    let store = Arc::new(MemoryCandidateStore::new(embedded_pool(None)));
    let recorder = Arc::new(Recorder::default());
    let p = pipeline(store).with_observer(recorder.clone());
    let query = SearchQuery::new("Rust engineer").unwrap();

    let relevant: BTreeSet<CandidateId> = [CandidateId(9)].into_iter().collect();
    let out = p.search_labeled(&query, relevant.clone());

    let seen = recorder.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(&seen[0].query_id, query.id());
    assert_eq!(seen[0].results.len(), out.results.len());
    assert_eq!(seen[0].relevant.as_ref(), Some(&relevant));
}

#[test]
fn max_results_caps_output() {
    let store = Arc::new(MemoryCandidateStore::new(embedded_pool(None)));
    let query = SearchQuery::new("engineer").unwrap().with_max_results(3);
    let out = pipeline(store).search(&query);
    assert_eq!(out.results.len(), 3);
    assert_eq!(out.summary.total, 3);
}
