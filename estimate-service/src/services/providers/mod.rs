//! Completion provider abstractions and implementations.
//!
//! Every generative text or HTML output goes through a [`CompletionProvider`],
//! so the OpenAI backend can be swapped for the mock in tests and local runs.

pub mod mock;
pub mod openai;

use super::metrics;
use async_trait::async_trait;
use service_core::error::AppError;
use std::time::Instant;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Empty completion")]
    EmptyCompletion,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::CompletionError(err.to_string())
    }
}

/// Sampling parameters for a completion.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// One prompt: a system instruction plus the user message.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Short label used for metrics and logs (e.g. `screen_list`).
    pub purpose: &'static str,
    pub system: String,
    pub prompt: String,
    pub params: GenerationParams,
}

impl CompletionRequest {
    pub fn new(purpose: &'static str, system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            purpose,
            system: system.into(),
            prompt: prompt.into(),
            params: GenerationParams::default(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.params.temperature = Some(temperature);
        self
    }
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Result of a completion call.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Trimmed completion text.
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub finish_reason: FinishReason,
}

/// Trait for chat-completion style text generation.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a single completion for `request`.
    async fn complete(&self, request: &CompletionRequest)
        -> Result<CompletionResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Provider name for logs.
    fn name(&self) -> &'static str;
}

/// Runs `request` against `provider`, recording metrics, and returns the
/// completion text.
pub async fn complete_text(
    provider: &dyn CompletionProvider,
    request: CompletionRequest,
) -> Result<String, ProviderError> {
    let start = Instant::now();
    let result = provider.complete(&request).await;
    let elapsed = start.elapsed().as_secs_f64();

    match result {
        Ok(response) => {
            metrics::record_completion(request.purpose, "success", elapsed);
            metrics::record_tokens(
                request.purpose,
                response.input_tokens,
                response.output_tokens,
            );
            if response.finish_reason == FinishReason::Length {
                tracing::warn!(purpose = request.purpose, "Completion truncated at token limit");
            }
            tracing::debug!(
                provider = provider.name(),
                purpose = request.purpose,
                output_tokens = response.output_tokens,
                elapsed_secs = elapsed,
                "Completion finished"
            );
            Ok(response.text)
        }
        Err(e) => {
            metrics::record_completion(request.purpose, "error", elapsed);
            metrics::record_error("completion");
            tracing::error!(
                provider = provider.name(),
                purpose = request.purpose,
                error = %e,
                "Completion failed"
            );
            Err(e)
        }
    }
}
