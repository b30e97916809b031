//! Per-candidate evidence: chunk construction, budget optimisation, and
//! quality assessment.

pub mod builder;
pub mod optimizer;
pub mod quality;

pub use builder::ContextBuilder;
pub use optimizer::optimize_context;
pub use quality::{assess_quality, ContextQuality, QualityLevel};
