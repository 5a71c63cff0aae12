use axum::{
    extract::{Path, State},
    Json,
};

use crate::models::{LoadDraftResponse, SaveDraftRequest, SaveDraftResponse};
use crate::startup::AppState;
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

pub async fn save_draft(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SaveDraftRequest>,
) -> Result<Json<SaveDraftResponse>, AppError> {
    let id = state.drafts.save(request.id, request.answers).await;
    tracing::debug!(draft_id = %id, "Draft saved");
    Ok(Json(SaveDraftResponse { id }))
}

pub async fn load_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LoadDraftResponse>, AppError> {
    let answers = state
        .drafts
        .load(&id)
        .await
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Draft {} not found", id)))?;
    Ok(Json(LoadDraftResponse { answers }))
}
