//! First-stage retrieval: vector, keyword, and their fusion.

pub mod keyword_search;
pub mod keywords;
pub mod query_aspects;
pub mod rrf_fusion;
pub mod vector_search;

pub use keyword_search::KeywordSearchEngine;
pub use rrf_fusion::FusionEngine;
pub use vector_search::{QueryEmbeddings, VectorSearchEngine};
