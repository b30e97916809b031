//! Coverage and relevance checks over a candidate's context chunks.

use serde::Serialize;
use talent_core::models::{ChunkType, ContextChunk};

const MIN_AVG_CHUNK_CHARS: f64 = 50.0;
const MIN_AVG_RELEVANCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextQuality {
    pub level: QualityLevel,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Zero issues is `High`, up to two is `Medium`, more is `Low`.
pub fn assess_quality(chunks: &[ContextChunk]) -> ContextQuality {
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();
    let mut flag = |issue: &str, recommendation: &str| {
        issues.push(issue.to_string());
        recommendations.push(recommendation.to_string());
    };

    let has = |t: ChunkType| chunks.iter().any(|c| c.chunk_type == t);
    if !has(ChunkType::Profile) {
        flag("Missing profile information", "Add candidate profile data");
    }
    if !has(ChunkType::Skills) {
        flag("Missing skills information", "Add candidate skills data");
    }
    if !has(ChunkType::Experience) {
        flag("Missing experience information", "Add candidate experience data");
    }

    if !chunks.is_empty() {
        let n = chunks.len() as f64;
        let avg_size = chunks.iter().map(|c| c.content.chars().count()).sum::<usize>() as f64 / n;
        if avg_size < MIN_AVG_CHUNK_CHARS {
            flag(
                "Context chunks are too small",
                "Increase context chunk size for better quality",
            );
        }
        let avg_relevance = chunks.iter().map(|c| c.relevance).sum::<f64>() / n;
        if avg_relevance < MIN_AVG_RELEVANCE {
            flag(
                "Low average relevance scores",
                "Improve embedding quality or candidate data",
            );
        }
    }

    let level = match issues.len() {
        0 => QualityLevel::High,
        1..=2 => QualityLevel::Medium,
        _ => QualityLevel::Low,
    };

    ContextQuality {
        level,
        issues,
        recommendations,
    }
}
