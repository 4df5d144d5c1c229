//! LLM integration for product copy generation.
//!
//! Provides a provider abstraction over OpenAI-compatible APIs and a
//! sequential client that completes batches in order with rate-limit backoff.

pub(crate) mod client;
pub(crate) mod openai;
pub(crate) mod provider;
pub(crate) mod retry;

pub use client::{CompletionClient, CompletionReport};
pub use openai::OpenAiProvider;
pub use provider::{
    resolve_env_var, CompletionProvider, CompletionResponse, GenerationParams, ProviderFactory,
};
pub use retry::RetryPolicy;
