use std::sync::Arc;

use proptest::prelude::*;
use talent_core::traits::IEmbeddingProvider;
use talent_providers::{CachedEmbeddingProvider, HashingEmbeddingProvider};

proptest! {
    #[test]
    fn hashing_embeddings_are_unit_or_zero(s in ".{0,200}") {
        let p = HashingEmbeddingProvider::new(64);
        let v = p.embed(&s).unwrap();
        prop_assert_eq!(v.len(), 64);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn cache_is_transparent(texts in prop::collection::vec("[a-z ]{0,30}", 0..10)) {
        let inner: Arc<dyn IEmbeddingProvider> = Arc::new(HashingEmbeddingProvider::new(32));
        let cached = CachedEmbeddingProvider::new(inner.clone(), 1_000);
        let direct = inner.embed_batch(&texts).unwrap();
        prop_assert_eq!(cached.embed_batch(&texts).unwrap(), direct.clone());
        prop_assert_eq!(cached.embed_batch(&texts).unwrap(), direct);
    }
}
