use proptest::prelude::*;
use talent_core::models::{FieldWeights, SubScores};
use talent_core::similarity::cosine_similarity;

fn vector(len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, len)
}

fn pair() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    (1usize..32).prop_flat_map(|n| (vector(n), vector(n)))
}

proptest! {
    #[test]
    fn cosine_is_symmetric((a, b) in pair()) {
        prop_assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn cosine_of_self_is_one(a in vector(16)) {
        prop_assume!(a.iter().any(|x| x.abs() > 1e-3));
        prop_assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_is_bounded((a, b) in pair()) {
        let s = cosine_similarity(&a, &b);
        prop_assert!((-1.0..=1.0).contains(&s));
    }

    #[test]
    fn normalised_weights_are_convex(
        p in 0.0f64..1.0, s in 0.0f64..1.0, e in 0.0f64..1.0, r in 0.0f64..1.0,
    ) {
        let total = p + s + e + r;
        prop_assume!(total > 1e-3);
        let w = FieldWeights {
            profile: p / total,
            skills: s / total,
            experience: e / total,
            resume: r / total,
        };
        prop_assert!((w.sum() - 1.0).abs() < 1e-6);
        prop_assert!(w.validate().is_ok());
    }

    #[test]
    fn composite_stays_within_sub_score_range(
        p in 0.0f64..=1.0, s in 0.0f64..=1.0, e in 0.0f64..=1.0, r in 0.0f64..=1.0,
    ) {
        let scores = SubScores { profile: p, skills: s, experience: e, resume: r, keyword: 0.0 };
        let c = FieldWeights::default().composite(&scores);
        let lo = p.min(s).min(e).min(r);
        let hi = p.max(s).max(e).max(r);
        prop_assert!(c >= lo - 1e-9 && c <= hi + 1e-9);
    }
}
