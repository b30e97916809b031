use std::sync::Arc;

use proptest::prelude::*;
use talent_core::models::{CandidateId, CandidateRecord, RetrievalMethod, ScoredCandidate, SubScores};
use talent_retrieval::search::keywords::informative_tokens;
use talent_retrieval::FusionEngine;

fn scored(id: u64, score: f64, method: RetrievalMethod) -> ScoredCandidate {
    let candidate: CandidateRecord = serde_json::from_value(serde_json::json!({
        "id": id,
        "name": format!("c{id}"),
    }))
    .unwrap();
    ScoredCandidate {
        candidate: Arc::new(candidate),
        sub_scores: SubScores {
            skills: score,
            ..SubScores::default()
        },
        match_score: score,
        method,
    }
}

fn list(method: RetrievalMethod) -> impl Strategy<Value = Vec<ScoredCandidate>> {
    prop::collection::vec((0u64..40, 0.0f64..1.0), 0..25).prop_map(move |items| {
        items
            .into_iter()
            .map(|(id, s)| scored(id, s, method))
            .collect()
    })
}

fn ranked_vector_list() -> impl Strategy<Value = Vec<ScoredCandidate>> {
    prop::collection::btree_map(0u64..60, 0.0f64..1.0, 0..30).prop_map(|m| {
        let mut v: Vec<ScoredCandidate> = m
            .into_iter()
            .map(|(id, s)| scored(id, s, RetrievalMethod::Vector))
            .collect();
        v.sort_by(ScoredCandidate::rank_order);
        v
    })
}

proptest! {
    #[test]
    fn fusion_is_deterministic(
        v in list(RetrievalMethod::Vector),
        k in list(RetrievalMethod::Keyword),
        rrf_k in 1u32..200,
    ) {
        let engine = FusionEngine::new(rrf_k);
        let a: Vec<(u64, f64)> = engine.fuse(&v, &k).iter().map(|c| (c.id().0, c.rrf_score)).collect();
        let b: Vec<(u64, f64)> = engine.fuse(&v, &k).iter().map(|c| (c.id().0, c.rrf_score)).collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn fused_output_is_totally_ordered(
        v in list(RetrievalMethod::Vector),
        k in list(RetrievalMethod::Keyword),
    ) {
        let fused = FusionEngine::default().fuse(&v, &k);
        for pair in fused.windows(2) {
            prop_assert!(
                pair[0].rrf_score > pair[1].rrf_score
                    || (pair[0].rrf_score == pair[1].rrf_score && pair[0].id() < pair[1].id())
            );
        }
        // No candidate appears twice, and none beats two first places.
        let max = 2.0 / 61.0;
        prop_assert!(fused.iter().all(|c| c.rrf_score > 0.0 && c.rrf_score <= max + 1e-12));
    }

    #[test]
    fn empty_keyword_list_preserves_vector_order(v in ranked_vector_list()) {
        let fused = FusionEngine::default().fuse(&v, &[]);
        let fused_ids: Vec<u64> = fused.iter().map(|c| c.id().0).collect();
        let vector_ids: Vec<u64> = v.iter().map(|c| c.id().0).collect();
        prop_assert_eq!(fused_ids, vector_ids);
        prop_assert!(fused.iter().all(|c| c.scored.method == RetrievalMethod::Vector));
    }

    #[test]
    fn fused_match_score_prefers_vector_composite(
        v in list(RetrievalMethod::Vector),
        k in list(RetrievalMethod::Keyword),
    ) {
        let fused = FusionEngine::default().fuse(&v, &k);
        // Repeats within one list are ignored, so only first occurrences count.
        let first = |list: &[ScoredCandidate], id: CandidateId| {
            list.iter().find(|s| s.id() == id).map(|s| s.match_score)
        };
        for c in &fused {
            let expected = first(&v, c.id()).or_else(|| first(&k, c.id()));
            prop_assert_eq!(Some(c.scored.match_score), expected);
        }
    }

    #[test]
    fn keyword_tokens_respect_bounds(text in "[a-zA-Z ,.]{0,200}") {
        let tokens = informative_tokens(&text, 3, 10);
        prop_assert!(tokens.len() <= 10);
        prop_assert!(tokens.iter().all(|t| t.chars().count() >= 3));
        prop_assert!(tokens.iter().all(|t| *t == t.to_lowercase()));
    }
}
