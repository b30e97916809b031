mod candidate_store;
mod embedding;
mod reranker;
mod search_observer;
mod telemetry_store;

pub use candidate_store::ICandidateStore;
pub use embedding::IEmbeddingProvider;
pub use reranker::IRerankerModel;
pub use search_observer::ISearchObserver;
pub use telemetry_store::ITelemetryStore;
