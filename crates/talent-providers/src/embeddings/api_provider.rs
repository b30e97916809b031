//! HTTP embedding provider for OpenAI-compatible `/v1/embeddings` endpoints.
//!
//! One request per call, no retry. Transport failures and non-2xx replies
//! surface as `EmbeddingError::Unavailable` so callers can degrade.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use talent_core::config::EmbeddingConfig;
use talent_core::errors::{EmbeddingError, TalentError, TalentResult};
use talent_core::traits::IEmbeddingProvider;
use tracing::{debug, warn};

pub struct ApiEmbeddingProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

impl ApiEmbeddingProvider {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        dimensions: usize,
        timeout: Duration,
    ) -> TalentResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TalentError::ConfigError(format!("http client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            dimensions,
        })
    }

    /// Build from config, reading the API key from `config.api_key_env`.
    pub fn from_config(config: &EmbeddingConfig) -> TalentResult<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            TalentError::ConfigError(format!(
                "embedding API key variable {} is not set",
                config.api_key_env
            ))
        })?;
        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            config.dimensions,
            Duration::from_millis(config.timeout_ms),
        )
    }

    fn unavailable(&self, reason: String) -> TalentError {
        EmbeddingError::Unavailable {
            provider: self.model.clone(),
            reason,
        }
        .into()
    }

    fn request(&self, texts: &[String]) -> TalentResult<Vec<Vec<f32>>> {
        debug!(model = %self.model, batch = texts.len(), "requesting embeddings");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&EmbedRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .map_err(|e| {
                warn!(error = %e, "embedding request failed");
                self.unavailable(format!("HTTP error: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(%status, "embedding API returned an error");
            return Err(self.unavailable(format!("API returned {status}: {body}")));
        }

        let parsed: EmbedResponse =
            response
                .json()
                .map_err(|e| EmbeddingError::InvalidResponse {
                    reason: format!("JSON parse error: {e}"),
                })?;

        if parsed.data.len() != texts.len() {
            return Err(EmbeddingError::InvalidResponse {
                reason: format!(
                    "expected {} embeddings, got {}",
                    texts.len(),
                    parsed.data.len()
                ),
            }
            .into());
        }

        parsed
            .data
            .into_iter()
            .map(|d| -> TalentResult<Vec<f32>> {
                if d.embedding.len() != self.dimensions {
                    return Err(EmbeddingError::DimensionMismatch {
                        expected: self.dimensions,
                        actual: d.embedding.len(),
                    }
                    .into());
                }
                Ok(d.embedding)
            })
            .collect()
    }
}

impl IEmbeddingProvider for ApiEmbeddingProvider {
    fn embed(&self, text: &str) -> TalentResult<Vec<f32>> {
        let mut out = self.request(&[text.to_string()])?;
        out.pop().ok_or_else(|| {
            EmbeddingError::InvalidResponse {
                reason: "empty response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> TalentResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_variable_is_config_error() {
        let config = EmbeddingConfig {
            api_key_env: "TALENT_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Default::default()
        };
        assert!(matches!(
            ApiEmbeddingProvider::from_config(&config),
            Err(TalentError::ConfigError(_))
        ));
    }

    #[test]
    fn unreachable_endpoint_is_unavailable() {
        let provider = ApiEmbeddingProvider::new(
            "http://127.0.0.1:9/v1/embeddings",
            "test-model",
            "key",
            8,
            Duration::from_millis(500),
        )
        .unwrap();
        let err = provider.embed("hello").unwrap_err();
        assert!(err.is_embedding_unavailable(), "got {err}");
    }

    #[test]
    fn empty_batch_makes_no_request() {
        let provider = ApiEmbeddingProvider::new(
            "http://127.0.0.1:9/v1/embeddings",
            "test-model",
            "key",
            8,
            Duration::from_millis(500),
        )
        .unwrap();
        assert!(provider.embed_batch(&[]).unwrap().is_empty());
    }
}
