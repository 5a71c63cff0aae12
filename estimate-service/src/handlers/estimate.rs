use axum::{extract::State, Json};

use crate::models::{
    AiEstimate, AnswersRequest, EstimateResponse, OrderProposal, ScreenDetailsRequest,
    ScreenDetailsResponse,
};
use crate::startup::AppState;
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

#[tracing::instrument(skip(state, request))]
pub async fn estimate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AnswersRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    let estimate = state.estimator.generate(&request.answers).await?;
    Ok(Json(estimate))
}

#[tracing::instrument(skip(state, request), fields(screen = %request.screen))]
pub async fn screen_details(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ScreenDetailsRequest>,
) -> Result<Json<ScreenDetailsResponse>, AppError> {
    let details = state
        .estimator
        .screen_details(request.screen.trim(), &request.answers)
        .await?;
    Ok(Json(details))
}

/// Structured AI workload estimate for a proposed order.
#[tracing::instrument(skip(state, proposal))]
pub async fn order_estimate(
    State(state): State<AppState>,
    ValidatedJson(proposal): ValidatedJson<OrderProposal>,
) -> Result<Json<AiEstimate>, AppError> {
    let estimate = state.estimator.order_estimate(&proposal).await?;
    Ok(Json(estimate))
}
