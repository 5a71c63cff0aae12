//! Estimate generation: requirements documents, screen list, workload and
//! critique for a set of answers.

use super::analysis;
use super::prompts;
use super::providers::{complete_text, CompletionProvider};
use crate::models::{
    extract_json_block, AiEstimate, Answers, EstimateResponse, OrderProposal,
    ScreenDetailsResponse,
};
use once_cell::sync::Lazy;
use regex::Regex;
use service_core::error::AppError;
use std::sync::Arc;
use tracing::{info, instrument};

/// Upper bound on screens returned by `/estimate`.
pub const MAX_SCREENS: usize = 10;

static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*•・]\s*|\d+\s*[.)．、]\s*)+").expect("static list marker pattern"));

#[derive(Clone)]
pub struct EstimateGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl EstimateGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Full estimate for `answers`. The five prompts run concurrently; any
    /// failure fails the whole estimate.
    #[instrument(skip(self, answers), fields(questions = answers.len()))]
    pub async fn generate(&self, answers: &Answers) -> Result<EstimateResponse, AppError> {
        let provider = self.provider.as_ref();

        let (requirements_specification, requirements_definition, screens, estimate_develop, critique) =
            tokio::try_join!(
                complete_text(provider, prompts::requirements_specification(answers)),
                complete_text(provider, prompts::requirements_definition(answers)),
                complete_text(provider, prompts::screen_list(answers)),
                complete_text(provider, prompts::total_workload(answers)),
                complete_text(provider, prompts::critique(answers)),
            )?;

        let sentiments = analysis::answer_sentiments(answers);
        let keywords = analysis::extract_keywords(answers);
        let screens = parse_screen_list(&screens, MAX_SCREENS);

        info!(screens = screens.len(), keywords = keywords.len(), "Estimate generated");

        Ok(EstimateResponse {
            requirements_specification,
            requirements_definition,
            screens,
            estimate_develop,
            analysis: analysis::combine_analysis(&critique, &sentiments, &keywords),
        })
    }

    /// Workload, basic design and HTML sample for a single screen.
    #[instrument(skip(self, answers))]
    pub async fn screen_details(
        &self,
        screen: &str,
        answers: &Answers,
    ) -> Result<ScreenDetailsResponse, AppError> {
        let provider = self.provider.as_ref();

        let (workload, basic_design, screen_sample) = tokio::try_join!(
            complete_text(provider, prompts::screen_workload(screen, answers)),
            complete_text(provider, prompts::basic_design(screen, answers)),
            complete_text(provider, prompts::screen_sample(screen, answers)),
        )?;

        Ok(ScreenDetailsResponse {
            workload,
            basic_design,
            screen_sample,
        })
    }

    /// Structured per-screen, per-event and database workload estimate for
    /// an order proposal.
    #[instrument(skip(self, proposal), fields(screens = proposal.screens.len(), events = proposal.events.len()))]
    pub async fn order_estimate(&self, proposal: &OrderProposal) -> Result<AiEstimate, AppError> {
        let reply = complete_text(self.provider.as_ref(), prompts::order_estimate(proposal)).await?;
        parse_order_estimate(&reply)
    }
}

/// Parses the model's estimate reply into an [`AiEstimate`].
pub fn parse_order_estimate(reply: &str) -> Result<AiEstimate, AppError> {
    let json = extract_json_block(reply).ok_or_else(|| {
        tracing::error!("No JSON found in AI response");
        AppError::CompletionError("No JSON found in AI response".to_string())
    })?;

    serde_json::from_str(json).map_err(|e| {
        tracing::error!(error = %e, "Error parsing JSON from AI response");
        AppError::CompletionError(format!("Invalid JSON in AI response: {}", e))
    })
}

/// Splits a model-produced list into clean item names.
///
/// Bullet markers and leading enumeration are removed, blank lines dropped
/// and at most `limit` items kept.
pub fn parse_screen_list(text: &str, limit: usize) -> Vec<String> {
    text.lines()
        .map(|line| LIST_MARKER.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(limit)
        .collect()
}
