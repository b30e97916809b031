//! In-memory embedding cache using moka.
//!
//! Keys are blake3 content hashes. Failures are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use talent_core::errors::TalentResult;
use talent_core::traits::IEmbeddingProvider;
use tracing::debug;

pub struct CachedEmbeddingProvider {
    inner: Arc<dyn IEmbeddingProvider>,
    cache: Cache<String, Vec<f32>>,
    name: String,
}

impl CachedEmbeddingProvider {
    pub fn new(inner: Arc<dyn IEmbeddingProvider>, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        let name = format!("cached({})", inner.name());
        Self { inner, cache, name }
    }

    fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl IEmbeddingProvider for CachedEmbeddingProvider {
    fn embed(&self, text: &str) -> TalentResult<Vec<f32>> {
        let key = Self::key(text);
        if let Some(hit) = self.cache.get(&key) {
            debug!(hash = %key, "embedding cache hit");
            return Ok(hit);
        }
        let vector = self.inner.embed(text)?;
        self.cache.insert(key, vector.clone());
        Ok(vector)
    }

    fn embed_batch(&self, texts: &[String]) -> TalentResult<Vec<Vec<f32>>> {
        let keys: Vec<String> = texts.iter().map(|t| Self::key(t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys.iter().map(|k| self.cache.get(k)).collect();

        let missing: Vec<usize> = (0..texts.len()).filter(|i| out[*i].is_none()).collect();
        if !missing.is_empty() {
            let batch: Vec<String> = missing.iter().map(|i| texts[*i].clone()).collect();
            let computed = self.inner.embed_batch(&batch)?;
            for (i, vector) in missing.into_iter().zip(computed) {
                self.cache.insert(keys[i].clone(), vector.clone());
                out[i] = Some(vector);
            }
        }

        Ok(out.into_iter().flatten().collect())
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use talent_core::errors::EmbeddingError;

    use super::*;

    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl IEmbeddingProvider for CountingProvider {
        fn embed(&self, text: &str) -> TalentResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(EmbeddingError::Unavailable {
                    provider: "counting".into(),
                    reason: "down".into(),
                }
                .into());
            }
            Ok(vec![text.len() as f32])
        }
        fn dimensions(&self) -> usize {
            1
        }
        fn name(&self) -> &str {
            "counting"
        }
        fn is_available(&self) -> bool {
            !self.fail
        }
    }

    #[test]
    fn second_lookup_is_served_from_cache() {
        let inner = Arc::new(CountingProvider { calls: AtomicUsize::new(0), fail: false });
        let cached = CachedEmbeddingProvider::new(inner.clone(), 100);
        assert_eq!(cached.embed("hello").unwrap(), vec![5.0]);
        assert_eq!(cached.embed("hello").unwrap(), vec![5.0]);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn batch_only_computes_misses() {
        let inner = Arc::new(CountingProvider { calls: AtomicUsize::new(0), fail: false });
        let cached = CachedEmbeddingProvider::new(inner.clone(), 100);
        cached.embed("a").unwrap();
        let out = cached
            .embed_batch(&["a".to_string(), "bbb".to_string()])
            .unwrap();
        assert_eq!(out, vec![vec![1.0], vec![3.0]]);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let inner = Arc::new(CountingProvider { calls: AtomicUsize::new(0), fail: true });
        let cached = CachedEmbeddingProvider::new(inner.clone(), 100);
        assert!(cached.embed("x").is_err());
        assert!(cached.embed("x").is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.entry_count(), 0);
    }
}
