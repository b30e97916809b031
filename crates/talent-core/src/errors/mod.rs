mod embedding_error;
mod rerank_error;
mod search_error;
mod telemetry_error;

pub use embedding_error::EmbeddingError;
pub use rerank_error::RerankError;
pub use search_error::SearchError;
pub use telemetry_error::TelemetryError;

/// Top-level error for the whole engine. Subsystem errors convert into it with `?`.
#[derive(Debug, thiserror::Error)]
pub enum TalentError {
    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("search error: {0}")]
    SearchError(#[from] SearchError),

    #[error("rerank error: {0}")]
    RerankError(#[from] RerankError),

    #[error("telemetry error: {0}")]
    TelemetryError(#[from] TelemetryError),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

impl TalentError {
    /// True when the failure is a rejected job description.
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Self::SearchError(SearchError::InvalidQuery { .. }))
    }

    /// True when the embedding provider could not serve the request.
    pub fn is_embedding_unavailable(&self) -> bool {
        matches!(
            self,
            Self::EmbeddingError(EmbeddingError::Unavailable { .. })
        )
    }
}

pub type TalentResult<T> = Result<T, TalentError>;
