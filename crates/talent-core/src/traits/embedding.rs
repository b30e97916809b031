use crate::errors::TalentResult;

/// Embedding generation provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text. A single attempt; retries belong to the provider.
    fn embed(&self, text: &str) -> TalentResult<Vec<f32>>;

    /// Embed a batch of texts, in order.
    fn embed_batch(&self, texts: &[String]) -> TalentResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
