//! # talent-retrieval
//!
//! Hybrid candidate retrieval: multi-field vector search and keyword search
//! run side by side, are fused with Reciprocal Rank Fusion, expanded into
//! typed context chunks, and reranked by an LLM with a score fallback.

pub mod context;
pub mod engine;
pub mod ranking;
pub mod search;

pub use context::{ContextBuilder, ContextQuality, QualityLevel};
pub use engine::SearchPipeline;
pub use ranking::Reranker;
pub use search::{FusionEngine, KeywordSearchEngine, QueryEmbeddings, VectorSearchEngine};
