// Single source of truth for all default values.

// --- Search ---
pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_FIELD_POOL_SIZE: usize = 50;
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_HYBRID: bool = true;
pub const DEFAULT_PROFILE_WEIGHT: f64 = 0.3;
pub const DEFAULT_SKILLS_WEIGHT: f64 = 0.4;
pub const DEFAULT_EXPERIENCE_WEIGHT: f64 = 0.2;
pub const DEFAULT_RESUME_WEIGHT: f64 = 0.1;
pub const DEFAULT_INCLUDE_REMOTE: bool = true;

// --- Keyword search ---
pub const DEFAULT_MAX_KEYWORDS: usize = 10;
pub const DEFAULT_MIN_KEYWORD_LEN: usize = 3;
pub const DEFAULT_TITLE_MATCH_WEIGHT: f64 = 0.3;
pub const DEFAULT_SUMMARY_MATCH_WEIGHT: f64 = 0.2;
pub const DEFAULT_SKILL_MATCH_WEIGHT: f64 = 0.4;

// --- Rerank ---
pub const DEFAULT_RERANK_ENABLED: bool = true;
pub const DEFAULT_RERANK_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_RERANK_MAX_TOKENS: u32 = 200;
pub const DEFAULT_RERANK_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_RERANK_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_CONTEXT_TOKEN_BUDGET: usize = 2_000;
pub const DEFAULT_SUMMARY_RELEVANCE_THRESHOLD: f64 = 0.3;
pub const DEFAULT_SUMMARY_MAX_CHUNKS: usize = 3;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

// --- Evaluation ---
pub const DEFAULT_TELEMETRY_ENABLED: bool = true;
pub const DEFAULT_ANALYTICS_WINDOW_HOURS: u32 = 24;
pub const DEFAULT_RECOMMENDATION_WINDOW_HOURS: u32 = 168;
pub const DEFAULT_SLOW_RESPONSE_MS: f64 = 2_000.0;
pub const DEFAULT_MIN_AVG_RELEVANCE: f64 = 0.7;
pub const DEFAULT_MIN_METHOD_SCORE: f64 = 0.6;
pub const DEFAULT_SLOW_METHOD_MS: f64 = 3_000.0;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
