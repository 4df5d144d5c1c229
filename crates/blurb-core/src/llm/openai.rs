//! OpenAI-compatible provider for the Chat Completions and legacy Completions APIs.
//!
//! A chat batch is sent as one conversation (all payload messages in order); a
//! legacy batch is sent as a prompt array and yields one choice per prompt.

use super::provider::{CompletionProvider, CompletionResponse, GenerationParams};
use crate::error::PipelineError;
use crate::query::{ChatMessage, Payload};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// OpenAI provider.
pub struct OpenAiProvider {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl OpenAiProvider {
    /// Create a provider for `endpoint` (e.g. `https://api.openai.com/v1`).
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
            base_url: endpoint.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, PipelineError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e, "OpenAI request failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(PipelineError::Llm {
                message: format!("OpenAI HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        resp.json()
            .await
            .map_err(|e| self.transport_error(e, "Failed to parse OpenAI response"))
    }

    /// The request timeout covers the body read too, so both sides of the
    /// exchange can report `Timeout`.
    fn transport_error(&self, e: reqwest::Error, context: &str) -> PipelineError {
        if e.is_timeout() {
            PipelineError::Timeout {
                stage: "llm".to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            PipelineError::Llm {
                message: format!("{context}: {e}"),
                status_code: None,
            }
        }
    }

    async fn complete_chat(
        &self,
        messages: Vec<&ChatMessage>,
        params: &GenerationParams,
    ) -> Result<(Vec<String>, String, Option<u32>), PipelineError> {
        let body = ChatRequest {
            model: &params.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
        };
        let mut resp: ChatResponse = self.post("/chat/completions", &body).await?;
        resp.choices.sort_by_key(|c| c.index);
        let texts = resp
            .choices
            .into_iter()
            .map(|c| c.message.content.unwrap_or_default().trim().to_string())
            .collect();
        Ok((texts, resp.model, resp.usage.map(|u| u.total_tokens)))
    }

    async fn complete_legacy(
        &self,
        prompts: Vec<&str>,
        params: &GenerationParams,
    ) -> Result<(Vec<String>, String, Option<u32>), PipelineError> {
        let body = LegacyRequest {
            model: &params.model,
            prompt: prompts,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
        };
        let mut resp: LegacyResponse = self.post("/completions", &body).await?;
        resp.choices.sort_by_key(|c| c.index);
        let texts = resp
            .choices
            .into_iter()
            .map(|c| c.text.trim().to_string())
            .collect();
        Ok((texts, resp.model, resp.usage.map(|u| u.total_tokens)))
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<&'a ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Serialize)]
struct LegacyRequest<'a> {
    model: &'a str,
    prompt: Vec<&'a str>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    model: String,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    index: u32,
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct LegacyResponse {
    choices: Vec<LegacyChoice>,
    model: String,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct LegacyChoice {
    #[serde(default)]
    index: u32,
    text: String,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: u32,
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        batch: &[Payload],
        params: &GenerationParams,
    ) -> Result<CompletionResponse, PipelineError> {
        let start = Instant::now();

        let (texts, model, tokens_used) = match batch.first() {
            None => {
                return Err(PipelineError::Llm {
                    message: "Refusing to send an empty batch".to_string(),
                    status_code: None,
                })
            }
            Some(Payload::Chat(_)) => {
                let mut messages = Vec::new();
                for payload in batch {
                    match payload {
                        Payload::Chat(msgs) => messages.extend(msgs.iter()),
                        Payload::Prompt(_) => return Err(mixed_batch()),
                    }
                }
                self.complete_chat(messages, params).await?
            }
            Some(Payload::Prompt(_)) => {
                let mut prompts = Vec::with_capacity(batch.len());
                for payload in batch {
                    match payload {
                        Payload::Prompt(prompt) => prompts.push(prompt.as_str()),
                        Payload::Chat(_) => return Err(mixed_batch()),
                    }
                }
                self.complete_legacy(prompts, params).await?
            }
        };

        if texts.is_empty() {
            return Err(PipelineError::Llm {
                message: "OpenAI returned empty choices array, no content generated".to_string(),
                status_code: None,
            });
        }

        Ok(CompletionResponse {
            texts,
            model,
            tokens_used,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

fn mixed_batch() -> PipelineError {
    PipelineError::Llm {
        message: "Batch mixes chat and prompt payloads".to_string(),
        status_code: None,
    }
}
