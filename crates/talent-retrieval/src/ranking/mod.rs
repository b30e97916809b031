//! Second-stage ranking: LLM relevance scoring with a match-score fallback.

pub mod parser;
pub mod prompt;
pub mod reranker;

pub use parser::{parse_reply, RerankReply};
pub use reranker::Reranker;
