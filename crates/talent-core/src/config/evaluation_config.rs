use serde::{Deserialize, Serialize};

use super::defaults;

/// Evaluation, telemetry, and recommendation thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub telemetry_enabled: bool,
    /// SQLite telemetry database path. In-memory store when unset.
    pub telemetry_db_path: Option<String>,
    pub analytics_window_hours: u32,
    pub recommendation_window_hours: u32,
    pub slow_response_ms: f64,
    pub min_avg_relevance: f64,
    pub min_method_score: f64,
    pub slow_method_ms: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            telemetry_enabled: defaults::DEFAULT_TELEMETRY_ENABLED,
            telemetry_db_path: None,
            analytics_window_hours: defaults::DEFAULT_ANALYTICS_WINDOW_HOURS,
            recommendation_window_hours: defaults::DEFAULT_RECOMMENDATION_WINDOW_HOURS,
            slow_response_ms: defaults::DEFAULT_SLOW_RESPONSE_MS,
            min_avg_relevance: defaults::DEFAULT_MIN_AVG_RELEVANCE,
            min_method_score: defaults::DEFAULT_MIN_METHOD_SCORE,
            slow_method_ms: defaults::DEFAULT_SLOW_METHOD_MS,
        }
    }
}
