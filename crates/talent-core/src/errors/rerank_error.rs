/// Reranking errors. None of these are fatal to a search.
#[derive(Debug, thiserror::Error)]
pub enum RerankError {
    #[error("could not parse model reply: {reason}")]
    Parse { reason: String },

    #[error("reranker model failed: {reason}")]
    Provider { reason: String },

    #[error("reranker model timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
}
