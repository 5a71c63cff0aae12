use axum::{extract::State, Json};

use crate::models::{AnswersRequest, ScreenPreview, SimulationResponse};
use crate::services::simulation;
use crate::startup::AppState;
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

#[tracing::instrument(skip(state, request))]
pub async fn preview(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AnswersRequest>,
) -> Result<Json<Vec<ScreenPreview>>, AppError> {
    let previews = state.previews.generate(&request.answers).await?;
    Ok(Json(previews))
}

/// Fixed-rule proposal; never calls the completion service.
pub async fn simulate(
    ValidatedJson(request): ValidatedJson<AnswersRequest>,
) -> Result<Json<SimulationResponse>, AppError> {
    let result = simulation::simulate(&request.answers);
    tracing::info!(template = %result.template, "Simulation completed");
    Ok(Json(result))
}
