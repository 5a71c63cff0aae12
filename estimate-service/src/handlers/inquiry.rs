use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::models::{
    AcceptOrderRequest, AcceptOrderResponse, InquiryResponse, OrderedEstimateResponse,
    SubmitInquiryRequest,
};
use crate::services::listing;
use crate::services::metrics::record_inquiry_operation;
use crate::services::NewInquiry;
use crate::startup::AppState;
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

#[tracing::instrument(skip(state, request))]
pub async fn submit_inquiry(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubmitInquiryRequest>,
) -> Result<(StatusCode, Json<InquiryResponse>), AppError> {
    let inquiry = NewInquiry::from_request(&request)?;

    let record = state.store.create_inquiry(inquiry).await.inspect_err(|_| {
        record_inquiry_operation("submit", "error");
    })?;
    record_inquiry_operation("submit", "success");

    Ok((StatusCode::CREATED, Json(listing::inquiry_response(&record))))
}

#[tracing::instrument(skip(state))]
pub async fn list_inquiries(
    State(state): State<AppState>,
) -> Result<Json<Vec<InquiryResponse>>, AppError> {
    let records = state.store.list_inquiries().await?;
    Ok(Json(records.iter().map(listing::inquiry_response).collect()))
}

#[tracing::instrument(skip(state))]
pub async fn inquiry_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<InquiryResponse>, AppError> {
    let record = state
        .store
        .get_inquiry(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Inquiry {} not found", id)))?;
    Ok(Json(listing::inquiry_response(&record)))
}

#[tracing::instrument(skip(state, request), fields(inquiry_id = request.inquiry_id))]
pub async fn accept_order(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AcceptOrderRequest>,
) -> Result<Json<AcceptOrderResponse>, AppError> {
    let result = state
        .store
        .accept_order(
            request.inquiry_id,
            &request.proposal,
            request.ai_response.as_ref(),
        )
        .await;

    match &result {
        Ok(_) => record_inquiry_operation("accept", "success"),
        Err(AppError::NotFound(_)) => record_inquiry_operation("accept", "not_found"),
        Err(_) => record_inquiry_operation("accept", "error"),
    }

    Ok(Json(result?))
}

#[tracing::instrument(skip(state))]
pub async fn ordered_estimates(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderedEstimateResponse>>, AppError> {
    let records = state.store.list_accepted().await?;
    Ok(Json(listing::ordered_estimates(&records)))
}
