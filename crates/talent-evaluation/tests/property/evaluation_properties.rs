use std::collections::BTreeSet;

use proptest::prelude::*;
use talent_core::models::{CandidateId, CandidateRecord, QueryType};
use talent_evaluation::{classify_query, metrics};

fn record(id: u64, company: u8, title: u8, location: u8) -> CandidateRecord {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": format!("c{id}"),
        "company": format!("company-{company}"),
        "title": format!("title-{title}"),
        "location": format!("city-{location}"),
    }))
    .unwrap()
}

proptest! {
    #[test]
    fn precision_recall_f1_are_bounded(
        retrieved in prop::collection::btree_set(0u64..30, 0..15),
        relevant in prop::collection::btree_set(0u64..30, 0..15),
    ) {
        let retrieved: Vec<CandidateId> = retrieved.into_iter().map(CandidateId).collect();
        let relevant: BTreeSet<CandidateId> = relevant.into_iter().map(CandidateId).collect();
        let p = metrics::precision(&retrieved, &relevant);
        let r = metrics::recall(&retrieved, &relevant);
        let f = metrics::f1(p, r);
        prop_assert!((0.0..=1.0).contains(&p));
        prop_assert!((0.0..=1.0).contains(&r));
        prop_assert!((0.0..=1.0).contains(&f));
        prop_assert!(f <= p.max(r) + 1e-12);
        prop_assert!(f >= p.min(r) - 1e-12 || f == 0.0);
    }

    #[test]
    fn retrieving_everything_relevant_gives_full_recall(
        relevant in prop::collection::btree_set(0u64..30, 1..15),
        extra in prop::collection::btree_set(30u64..60, 0..10),
    ) {
        let relevant: BTreeSet<CandidateId> = relevant.into_iter().map(CandidateId).collect();
        let retrieved: Vec<CandidateId> = relevant
            .iter()
            .copied()
            .chain(extra.into_iter().map(CandidateId))
            .collect();
        prop_assert_eq!(metrics::recall(&retrieved, &relevant), 1.0);
    }

    #[test]
    fn diversity_is_bounded(
        attrs in prop::collection::vec((0u8..4, 0u8..4, 0u8..4), 0..12),
    ) {
        let records: Vec<CandidateRecord> = attrs
            .iter()
            .enumerate()
            .map(|(i, (c, t, l))| record(i as u64, *c, *t, *l))
            .collect();
        let refs: Vec<&CandidateRecord> = records.iter().collect();
        let d = metrics::diversity(&refs);
        prop_assert!(d > 0.0 && d <= 1.0 + 1e-12);
    }

    #[test]
    fn classification_is_total_and_case_insensitive(text in "[a-zA-Z ]{0,60}") {
        let lower = classify_query(&text.to_lowercase());
        let upper = classify_query(&text.to_uppercase());
        prop_assert_eq!(lower, upper);
        prop_assert!(matches!(
            lower,
            QueryType::Technical | QueryType::Experience | QueryType::Location | QueryType::General
        ));
    }
}
