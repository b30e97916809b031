/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error("candidate store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    #[error("both search engines failed: vector: {vector}; keyword: {keyword}")]
    BothEnginesFailed { vector: String, keyword: String },
}
