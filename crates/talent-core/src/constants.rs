/// TalentMatch engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of embedding fields stored per candidate.
pub const EMBEDDING_FIELD_COUNT: usize = 4;

/// Tolerance used when checking that field weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Lowest accepted feedback rating.
pub const MIN_FEEDBACK_RATING: u8 = 1;

/// Highest accepted feedback rating.
pub const MAX_FEEDBACK_RATING: u8 = 5;

/// Characters per token used for context budget estimates.
pub const CHARS_PER_TOKEN: usize = 4;

/// Chunks kept when context optimisation cannot score relevance.
pub const CONTEXT_FALLBACK_CHUNKS: usize = 5;

/// Relevance assigned to a chunk whose similarity could not be computed.
pub const DEFAULT_CHUNK_RELEVANCE: f64 = 0.5;

/// Explanation attached to a result when reranking degrades to the fused score.
pub const RERANK_FALLBACK_EXPLANATION: &str =
    "Reranking unavailable; ranked by retrieval match score.";
