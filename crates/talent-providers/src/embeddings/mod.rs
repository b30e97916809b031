//! Embedding providers and the factory that builds one from config.

mod api_provider;
mod cached_provider;
mod hashing_provider;

use std::sync::Arc;

pub use api_provider::ApiEmbeddingProvider;
pub use cached_provider::CachedEmbeddingProvider;
pub use hashing_provider::HashingEmbeddingProvider;

use talent_core::config::EmbeddingConfig;
use talent_core::errors::{TalentError, TalentResult};
use talent_core::traits::IEmbeddingProvider;
use tracing::info;

/// Build the configured provider, wrapped in a cache when `cache_size > 0`.
pub fn build_provider(config: &EmbeddingConfig) -> TalentResult<Arc<dyn IEmbeddingProvider>> {
    let inner: Arc<dyn IEmbeddingProvider> = match config.provider.as_str() {
        "api" => Arc::new(ApiEmbeddingProvider::from_config(config)?),
        "hashing" => Arc::new(HashingEmbeddingProvider::new(config.dimensions)),
        other => {
            return Err(TalentError::ConfigError(format!(
                "unknown embedding provider: {other}"
            )))
        }
    };
    info!(
        provider = inner.name(),
        dimensions = inner.dimensions(),
        cache_size = config.cache_size,
        "embedding provider ready"
    );
    if config.cache_size == 0 {
        return Ok(inner);
    }
    Ok(Arc::new(CachedEmbeddingProvider::new(inner, config.cache_size)))
}
