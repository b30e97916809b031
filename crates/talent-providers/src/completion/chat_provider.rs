//! Chat-completion client used as the reranker model.
//!
//! Sends the prompt as a single user message to an OpenAI-compatible
//! `/v1/chat/completions` endpoint and returns the first choice's text.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use talent_core::config::RerankConfig;
use talent_core::errors::{RerankError, TalentError, TalentResult};
use talent_core::traits::IRerankerModel;
use tracing::{debug, warn};

pub struct ChatRerankerModel {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
    timeout_ms: u64,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatRerankerModel {
    pub fn new(config: &RerankConfig, api_key: impl Into<String>) -> TalentResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| TalentError::ConfigError(format!("http client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: api_key.into(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout_ms: config.timeout_ms,
        })
    }

    /// Build from config, reading the API key from `config.api_key_env`.
    pub fn from_config(config: &RerankConfig) -> TalentResult<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            TalentError::ConfigError(format!(
                "rerank API key variable {} is not set",
                config.api_key_env
            ))
        })?;
        Self::new(config, api_key)
    }

    fn transport_error(&self, e: reqwest::Error) -> TalentError {
        if e.is_timeout() {
            RerankError::Timeout {
                after_ms: self.timeout_ms,
            }
            .into()
        } else {
            RerankError::Provider {
                reason: format!("HTTP error: {e}"),
            }
            .into()
        }
    }
}

impl IRerankerModel for ChatRerankerModel {
    fn score(&self, prompt: &str) -> TalentResult<String> {
        debug!(model = %self.model, prompt_len = prompt.len(), "requesting completion");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages: [ChatMessage {
                    role: "user",
                    content: prompt,
                }],
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            })
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(%status, "completion API returned an error");
            return Err(RerankError::Provider {
                reason: format!("API returned {status}: {body}"),
            }
            .into());
        }

        let parsed: ChatResponse = response.json().map_err(|e| self.transport_error(e))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                RerankError::Provider {
                    reason: "completion had no content".to_string(),
                }
                .into()
            })
    }

    fn name(&self) -> &str {
        &self.model
    }
}
