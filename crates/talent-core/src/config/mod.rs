pub mod defaults;
mod embedding_config;
mod evaluation_config;
mod observability_config;
mod rerank_config;
mod search_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use evaluation_config::EvaluationConfig;
pub use observability_config::ObservabilityConfig;
pub use rerank_config::RerankConfig;
pub use search_config::{KeywordConfig, SearchConfig};

use crate::errors::{TalentError, TalentResult};

/// Top-level configuration aggregating all sub-configs.
///
/// Every section is optional in TOML; missing keys fall back to
/// the values in [`defaults`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TalentConfig {
    pub search: SearchConfig,
    pub rerank: RerankConfig,
    pub embedding: EmbeddingConfig,
    pub evaluation: EvaluationConfig,
    pub observability: ObservabilityConfig,
}

impl TalentConfig {
    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> TalentResult<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| TalentError::ConfigError(format!("<string>: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &Path) -> TalentResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TalentError::ConfigError(format!("{}: {e}", path.display())))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| TalentError::ConfigError(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints.
    pub fn validate(&self) -> TalentResult<()> {
        self.search.weights.validate()?;
        if self.search.max_results == 0 {
            return Err(TalentError::ConfigError(
                "search.max_results must be greater than 0".to_string(),
            ));
        }
        if self.search.field_pool_size < self.search.max_results {
            return Err(TalentError::ConfigError(
                "search.field_pool_size must be at least search.max_results".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.rerank.temperature) {
            return Err(TalentError::ConfigError(
                "rerank.temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        if self.embedding.dimensions == 0 {
            return Err(TalentError::ConfigError(
                "embedding.dimensions must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = TalentConfig::from_toml("").unwrap();
        assert_eq!(config.search.max_results, defaults::DEFAULT_MAX_RESULTS);
        assert_eq!(config.search.rrf_k, 60);
        assert_eq!(config.rerank.model, "gpt-3.5-turbo");
        assert!((config.search.weights.skills - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = TalentConfig::from_toml(
            r#"
            [search]
            max_results = 5

            [search.keyword]
            max_keywords = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.keyword.max_keywords, 8);
        assert_eq!(config.search.keyword.min_keyword_len, 3);
        assert!(config.search.hybrid);
    }

    #[test]
    fn weights_not_summing_to_one_are_rejected() {
        let err = TalentConfig::from_toml(
            r#"
            [search.weights]
            profile = 0.5
            skills = 0.5
            experience = 0.5
            resume = 0.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, TalentError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = TalentConfig::from_toml("search = [").unwrap_err();
        assert!(matches!(err, TalentError::ConfigError(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = TalentConfig::from_file(Path::new("/nonexistent/talent.toml")).unwrap_err();
        assert!(matches!(err, TalentError::ConfigError(_)));
    }
}
