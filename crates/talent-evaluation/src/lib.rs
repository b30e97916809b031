//! # talent-evaluation
//!
//! Retrieval-quality metrics (precision, recall, F1, diversity, context
//! relevancy), per-query telemetry with a background writer, user feedback,
//! windowed performance analytics with tuning recommendations, and
//! structured tracing setup.
//!
//! Evaluation is observational: nothing in this crate can fail a search.

pub mod analytics;
pub mod classify;
pub mod engine;
pub mod evaluator;
pub mod metrics;
pub mod recommendations;
pub mod tracing_setup;
pub mod writer;

pub use analytics::{MethodPerformance, PerformanceAnalytics};
pub use classify::classify_query;
pub use engine::EvaluationService;
pub use evaluator::Evaluator;
pub use recommendations::{recommend, Recommendation, Severity};
pub use writer::{TelemetryWriter, WriterStats};
