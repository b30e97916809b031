//! Tuning recommendations derived from performance analytics.

use serde::Serialize;
use talent_core::config::EvaluationConfig;

use crate::analytics::PerformanceAnalytics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub message: String,
    pub action: String,
}

impl Recommendation {
    fn new(severity: Severity, message: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            action: action.into(),
        }
    }
}

/// Twice over a latency threshold is critical.
fn latency_severity(value: f64, threshold: f64) -> Severity {
    if value > 2.0 * threshold {
        Severity::Critical
    } else {
        Severity::Warning
    }
}

/// Under half a score threshold is critical.
fn score_severity(value: f64, threshold: f64) -> Severity {
    if value < threshold / 2.0 {
        Severity::Critical
    } else {
        Severity::Warning
    }
}

/// Check the analytics against the configured thresholds, most severe first.
pub fn recommend(analytics: &PerformanceAnalytics, config: &EvaluationConfig) -> Vec<Recommendation> {
    if analytics.is_empty() {
        return vec![Recommendation::new(
            Severity::Info,
            format!("No searches recorded in the last {} hours", analytics.window_hours),
            "Enable telemetry or widen the analysis window",
        )];
    }

    let mut out = Vec::new();

    if analytics.average_response_time_ms > config.slow_response_ms {
        out.push(Recommendation::new(
            latency_severity(analytics.average_response_time_ms, config.slow_response_ms),
            format!(
                "Average response time is high ({:.0} ms)",
                analytics.average_response_time_ms
            ),
            "Consider optimizing query execution",
        ));
    }

    if analytics.average_relevance_score < config.min_avg_relevance {
        out.push(Recommendation::new(
            score_severity(analytics.average_relevance_score, config.min_avg_relevance),
            format!(
                "Relevance scores are low ({:.2})",
                analytics.average_relevance_score
            ),
            "Improve embedding quality or search parameters",
        ));
    }

    for (method, perf) in &analytics.method_performance {
        if perf.avg_score < config.min_method_score {
            out.push(Recommendation::new(
                score_severity(perf.avg_score, config.min_method_score),
                format!("{method} search is showing low relevance scores ({:.2})", perf.avg_score),
                format!("Tune {method} search"),
            ));
        }
        if perf.avg_time_ms > config.slow_method_ms {
            out.push(Recommendation::new(
                latency_severity(perf.avg_time_ms, config.slow_method_ms),
                format!("{method} search is slow ({:.0} ms)", perf.avg_time_ms),
                format!("Profile and speed up {method} search"),
            ));
        }
    }

    out.sort_by(|a, b| b.severity.cmp(&a.severity));
    out
}
