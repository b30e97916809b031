pub mod candidate;
pub mod context_chunk;
pub mod filter;
pub mod query;
pub mod ranked;
pub mod scored;
pub mod telemetry;

pub use candidate::{
    CandidateEmbeddings, CandidateId, CandidateRecord, EmbeddingField, RemotePreference,
};
pub use context_chunk::{ChunkMetadata, ChunkType, ContextChunk};
pub use filter::FilterExpr;
pub use query::{
    ExperienceLevel, KeywordQuery, QueryId, SearchFilters, SearchQuery, SearchRequest,
};
pub use ranked::{
    Degradation, MatchQuality, RankedResult, RerankSource, SearchOutcome, SearchSummary,
    StoreStats,
};
pub use scored::{
    FieldWeights, FusedCandidate, KeywordHit, RetrievalMethod, ScoredCandidate, SubScores,
};
pub use telemetry::{CompletedSearch, EvaluationMetrics, QueryType, SearchMetrics, UserFeedback};
