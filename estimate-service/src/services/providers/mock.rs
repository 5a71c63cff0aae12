//! Mock completion provider for tests and local runs.

use super::{
    CompletionProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderError,
};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock completion provider.
///
/// Replies `Mock response for: {prompt}` unless a scripted reply is
/// registered for the request's purpose. Every call is counted so tests can
/// assert how many prompts an endpoint issued.
pub struct MockCompletionProvider {
    enabled: bool,
    replies: Vec<(&'static str, String)>,
    failing: Vec<&'static str>,
    calls: AtomicUsize,
    calls_by_purpose: DashMap<&'static str, usize>,
}

impl MockCompletionProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            replies: Vec::new(),
            failing: Vec::new(),
            calls: AtomicUsize::new(0),
            calls_by_purpose: DashMap::new(),
        }
    }

    /// Answer requests with `purpose` using `reply`.
    pub fn with_reply(mut self, purpose: &'static str, reply: impl Into<String>) -> Self {
        self.replies.push((purpose, reply.into()));
        self
    }

    /// Fail requests with `purpose` with an API error.
    pub fn failing_on(mut self, purpose: &'static str) -> Self {
        self.failing.push(purpose);
        self
    }

    /// Total number of `complete` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, purpose: &str) -> usize {
        self.calls_by_purpose
            .get(purpose)
            .map(|count| *count)
            .unwrap_or(0)
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock completion provider not enabled".to_string(),
            ));
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.calls_by_purpose.entry(request.purpose).or_insert(0) += 1;

        if self.failing.contains(&request.purpose) {
            return Err(ProviderError::ApiError(format!(
                "Mock failure for {}",
                request.purpose
            )));
        }

        let text = self
            .replies
            .iter()
            .find(|(purpose, _)| *purpose == request.purpose)
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| format!("Mock response for: {}", request.prompt));

        Ok(CompletionResponse {
            input_tokens: request.prompt.len() as u32 / 4,
            output_tokens: text.len() as u32 / 4,
            text,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock completion provider not enabled".to_string(),
            ))
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
