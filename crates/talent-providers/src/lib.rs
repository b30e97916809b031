//! # talent-providers
//!
//! External model collaborators behind the core traits: embedding providers
//! and the chat-completion model used for reranking.

pub mod completion;
pub mod embeddings;

pub use completion::ChatRerankerModel;
pub use embeddings::{
    build_provider, ApiEmbeddingProvider, CachedEmbeddingProvider, HashingEmbeddingProvider,
};
