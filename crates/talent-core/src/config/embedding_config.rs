use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider type: "api" or "hashing".
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub dimensions: usize,
    pub timeout_ms: u64,
    /// Max entries held by the in-memory embedding cache. 0 disables caching.
    pub cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "api".to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            timeout_ms: defaults::DEFAULT_EMBEDDING_TIMEOUT_MS,
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}
