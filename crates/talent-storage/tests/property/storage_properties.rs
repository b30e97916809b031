use proptest::prelude::*;
use talent_core::models::{CandidateRecord, EmbeddingField, FilterExpr};
use talent_core::traits::ICandidateStore;
use talent_storage::sql::compile_filter;
use talent_storage::MemoryCandidateStore;

fn candidate(id: u64, profile: Vec<f32>, years: f64) -> CandidateRecord {
    let mut c: CandidateRecord = serde_json::from_value(serde_json::json!({
        "id": id,
        "name": format!("c{id}"),
        "years_experience": years,
    }))
    .unwrap();
    c.embeddings.profile = Some(profile);
    c
}

fn leaf() -> impl Strategy<Value = FilterExpr> {
    prop_oneof![
        Just(FilterExpr::Always),
        Just(FilterExpr::RemotePreferred),
        (0.0f64..20.0, 0.0f64..20.0).prop_map(|(a, b)| FilterExpr::ExperienceRange { min: a.min(b), max: a.max(b) }),
        "[a-z]{1,8}".prop_map(FilterExpr::LocationContains),
        "[a-z]{1,8}".prop_map(FilterExpr::HasSkill),
    ]
}

fn tree() -> impl Strategy<Value = FilterExpr> {
    leaf().prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(FilterExpr::And),
            prop::collection::vec(inner, 0..4).prop_map(FilterExpr::Or),
        ]
    })
}

proptest! {
    #[test]
    fn every_placeholder_has_a_param(expr in tree()) {
        let compiled = compile_filter(&expr);
        for n in 1..=compiled.params.len() {
            let placeholder = format!("${n}");
            prop_assert!(compiled.sql.contains(&placeholder));
        }
        let next = format!("${}", compiled.params.len() + 1);
        prop_assert!(!compiled.sql.contains(&next));
    }

    #[test]
    fn vector_results_are_totally_ordered(
        vectors in prop::collection::vec(prop::collection::vec(-1.0f32..1.0, 4), 1..30),
        query in prop::collection::vec(-1.0f32..1.0, 4),
        limit in 1usize..40,
    ) {
        let records: Vec<CandidateRecord> = vectors
            .into_iter()
            .enumerate()
            .map(|(i, v)| candidate(i as u64, v, 3.0))
            .collect();
        let store = MemoryCandidateStore::new(records);
        let hits = store
            .query_by_vector_similarity(EmbeddingField::Profile, &query, &FilterExpr::Always, limit)
            .unwrap();
        prop_assert!(hits.len() <= limit);
        for pair in hits.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.1 > b.1 || (a.1 == b.1 && a.0.id < b.0.id));
        }
    }

    #[test]
    fn experience_filter_is_honoured(
        years in prop::collection::vec((0u32..300).prop_map(|t| f64::from(t) / 10.0), 1..20),
        min in (0u32..150).prop_map(|t| f64::from(t) / 10.0),
    ) {
        let records: Vec<CandidateRecord> = years
            .iter()
            .enumerate()
            .map(|(i, y)| candidate(i as u64, vec![1.0, 0.0], *y))
            .collect();
        let store = MemoryCandidateStore::new(records);
        let filter = FilterExpr::ExperienceRange { min, max: min + 5.0 };
        let hits = store
            .query_by_vector_similarity(EmbeddingField::Profile, &[1.0, 0.0], &filter, 100)
            .unwrap();
        let expected = years.iter().filter(|y| (min..=min + 5.0).contains(*y)).count();
        prop_assert_eq!(hits.len(), expected);
    }
}
