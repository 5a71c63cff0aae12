//! Model-driven screen previews.

use super::estimator::parse_screen_list;
use super::prompts;
use super::providers::{complete_text, CompletionProvider, ProviderError};
use super::templates;
use crate::models::{Answers, ScreenPreview};
use futures::future::try_join_all;
use service_core::error::AppError;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Number of previews `/preview` always returns.
pub const PREVIEW_COUNT: usize = 3;

/// Screen names used when the model proposes fewer than [`PREVIEW_COUNT`].
const PLACEHOLDER_SCREENS: [&str; PREVIEW_COUNT] = ["トップ画面", "一覧画面", "詳細画面"];

#[derive(Clone)]
pub struct PreviewGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl PreviewGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Exactly [`PREVIEW_COUNT`] previews for `answers`.
    #[instrument(skip(self, answers), fields(questions = answers.len()))]
    pub async fn generate(&self, answers: &Answers) -> Result<Vec<ScreenPreview>, AppError> {
        let reply = complete_text(self.provider.as_ref(), prompts::preview_screen_list(answers)).await?;
        let screens = candidate_screens(&reply);

        let previews = try_join_all(screens.iter().map(|screen| self.preview_screen(screen))).await?;

        info!(count = previews.len(), "Screen previews generated");
        Ok(previews)
    }

    async fn preview_screen(&self, screen: &str) -> Result<ScreenPreview, ProviderError> {
        let provider = self.provider.as_ref();
        let template = templates::match_template(screen);
        debug!(screen, template = template.map(|t| t.name), "Generating preview");

        let (title, catchphrase, description, html) = tokio::try_join!(
            complete_text(provider, prompts::title(screen)),
            complete_text(provider, prompts::catchphrase(screen)),
            complete_text(provider, prompts::description(screen)),
            complete_text(provider, prompts::preview_html(screen, template.map(|t| t.html))),
        )?;

        Ok(ScreenPreview {
            title,
            catchphrase,
            description,
            preview: strip_code_fences(&html).to_string(),
            template: template.map(|t| t.name.to_string()),
        })
    }
}

/// Parses the candidate list and pads or truncates it to [`PREVIEW_COUNT`].
///
/// Padding takes placeholders in order, skipping any the model already named.
fn candidate_screens(reply: &str) -> Vec<String> {
    let mut screens = parse_screen_list(reply, PREVIEW_COUNT);
    for placeholder in PLACEHOLDER_SCREENS {
        if screens.len() >= PREVIEW_COUNT {
            break;
        }
        if !screens.iter().any(|s| s == placeholder) {
            screens.push(placeholder.to_string());
        }
    }
    screens
}

/// Returns the body of the first fenced code block, or the trimmed text
/// when there is none.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(open) = trimmed.find("```") else {
        return trimmed;
    };

    let after_fence = &trimmed[open + 3..];
    // Skip the language tag on the opening fence line.
    let body = match after_fence.find('\n') {
        Some(newline) => &after_fence[newline + 1..],
        None => after_fence,
    };
    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}
