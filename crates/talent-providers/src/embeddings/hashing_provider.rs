//! Deterministic feature-hashing embedder.
//!
//! Maps terms into fixed-dimension buckets weighted by term frequency.
//! No network access; used in development, tests, and air-gapped setups.

use std::collections::HashMap;

use talent_core::errors::TalentResult;
use talent_core::similarity::l2_normalize;
use talent_core::traits::IEmbeddingProvider;

pub struct HashingEmbeddingProvider {
    dimensions: usize,
}

impl HashingEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// FNV-1a bucket index.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    /// Lowercase terms; `+` and `#` stay attached so "c++" and "c#" survive.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }
        for (term, count) in tf {
            vec[Self::bucket(term, self.dimensions)] += count;
        }

        l2_normalize(&mut vec);
        vec
    }
}

impl IEmbeddingProvider for HashingEmbeddingProvider {
    fn embed(&self, text: &str) -> TalentResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }

    fn is_available(&self) -> bool {
        true
    }
}
