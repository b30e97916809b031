use serde::{Deserialize, Serialize};

use super::defaults;

/// LLM reranking and context assembly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankConfig {
    pub enabled: bool,
    pub model: String,
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
    /// Token budget for optimised context.
    pub context_token_budget: usize,
    /// Chunks at or below this relevance are left out of summaries.
    pub summary_relevance_threshold: f64,
    pub summary_max_chunks: usize,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_RERANK_ENABLED,
            model: defaults::DEFAULT_RERANK_MODEL.to_string(),
            endpoint: defaults::DEFAULT_CHAT_ENDPOINT.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            max_tokens: defaults::DEFAULT_RERANK_MAX_TOKENS,
            temperature: defaults::DEFAULT_RERANK_TEMPERATURE,
            timeout_ms: defaults::DEFAULT_RERANK_TIMEOUT_MS,
            context_token_budget: defaults::DEFAULT_CONTEXT_TOKEN_BUDGET,
            summary_relevance_threshold: defaults::DEFAULT_SUMMARY_RELEVANCE_THRESHOLD,
            summary_max_chunks: defaults::DEFAULT_SUMMARY_MAX_CHUNKS,
        }
    }
}
