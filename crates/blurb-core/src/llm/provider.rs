//! Completion provider trait and request/response types.
//!
//! Defines the interface the completion client drives, plus the factory that
//! builds the configured provider.

use crate::config::{Config, GenerationConfig};
use crate::error::PipelineError;
use crate::query::Payload;
use async_trait::async_trait;
use std::time::Duration;

/// Fixed generation parameters sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Only sent to the legacy completion API
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl GenerationParams {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            model: config.model().to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_p: config.top_p,
            frequency_penalty: config.frequency_penalty,
            presence_penalty: config.presence_penalty,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}

/// The response to one batch request.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated texts in choice order
    pub texts: Vec<String>,
    /// Model identifier reported by the API
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that completion backends implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the client holds a `Box<dyn CompletionProvider>`).
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Send one batch of payloads as a single request.
    async fn complete(
        &self,
        batch: &[Payload],
        params: &GenerationParams,
    ) -> Result<CompletionResponse, PipelineError>;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Factory that creates the configured provider.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the OpenAI-compatible provider from config.
    ///
    /// `api_key_override` takes precedence over the configured key.
    pub fn create(
        config: &Config,
        api_key_override: Option<&str>,
    ) -> Result<Box<dyn CompletionProvider>, PipelineError> {
        let cfg = &config.llm.openai;
        let api_key = api_key_override
            .map(String::from)
            .or_else(|| resolve_env_var(&cfg.api_key))
            .ok_or_else(|| PipelineError::Llm {
                message: format!(
                    "API key not set. Set the variable referenced by llm.openai.api_key ({}).",
                    cfg.api_key
                ),
                status_code: None,
            })?;

        Ok(Box::new(super::openai::OpenAiProvider::new(
            &cfg.endpoint,
            &api_key,
            Duration::from_millis(config.limits.request_timeout_ms),
        )))
    }
}
