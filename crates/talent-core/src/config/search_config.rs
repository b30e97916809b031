use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::FieldWeights;

/// Retrieval configuration shared by the vector and keyword engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result cap when the query does not set one.
    pub max_results: usize,
    /// Candidates fetched per embedding field before union.
    pub field_pool_size: usize,
    /// RRF k-value for rank fusion.
    pub rrf_k: u32,
    /// Run keyword search alongside vector search.
    pub hybrid: bool,
    /// Per-field weights for the composite vector score.
    pub weights: FieldWeights,
    pub keyword: KeywordConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: defaults::DEFAULT_MAX_RESULTS,
            field_pool_size: defaults::DEFAULT_FIELD_POOL_SIZE,
            rrf_k: defaults::DEFAULT_RRF_K,
            hybrid: defaults::DEFAULT_HYBRID,
            weights: FieldWeights::default(),
            keyword: KeywordConfig::default(),
        }
    }
}

/// Token extraction and scoring weights for keyword search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub max_keywords: usize,
    /// Tokens shorter than this are dropped.
    pub min_keyword_len: usize,
    pub title_weight: f64,
    pub summary_weight: f64,
    /// Added once per matched skill.
    pub skill_weight: f64,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            max_keywords: defaults::DEFAULT_MAX_KEYWORDS,
            min_keyword_len: defaults::DEFAULT_MIN_KEYWORD_LEN,
            title_weight: defaults::DEFAULT_TITLE_MATCH_WEIGHT,
            summary_weight: defaults::DEFAULT_SUMMARY_MATCH_WEIGHT,
            skill_weight: defaults::DEFAULT_SKILL_MATCH_WEIGHT,
        }
    }
}
