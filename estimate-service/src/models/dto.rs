//! HTTP request and response bodies.

use super::{AiResponsePayload, Answers, EstimateStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnswersRequest {
    pub answers: Answers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub requirements_specification: String,
    pub requirements_definition: String,
    pub screens: Vec<String>,
    pub estimate_develop: String,
    pub analysis: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScreenDetailsRequest {
    #[validate(length(min = 1, message = "Screen name cannot be empty"))]
    pub screen: String,
    pub answers: Answers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenDetailsResponse {
    pub workload: String,
    pub basic_design: String,
    pub screen_sample: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenPreview {
    pub title: String,
    pub catchphrase: String,
    pub description: String,
    pub preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// Fixed-rule proposal returned by `/simulate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub proposal: String,
    pub screens: Vec<String>,
    pub estimate_develop: String,
    pub template: String,
    pub description_file: String,
    pub preview: String,
}

// ---------------------------------------------------------------------------
// Inquiries
// ---------------------------------------------------------------------------

/// Estimate output the customer saw when submitting the inquiry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SimulationSummary {
    #[serde(default)]
    pub requirements_specification: String,
    #[serde(default)]
    pub requirements_definition: String,
    #[serde(default)]
    pub screens: Vec<String>,
    #[serde(default)]
    pub estimate_develop: String,
    #[serde(default)]
    pub answers: Answers,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitInquiryRequest {
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "simulationResult", alias = "simulation_result")]
    #[validate(nested)]
    pub simulation_result: SimulationSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenResponse {
    pub id: i64,
    pub title: String,
    pub catchphrase: String,
    pub description: String,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: i64,
    pub name: String,
    pub screen: String,
    pub process: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InquiryResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub inquiry: String,
    pub answers: String,
    pub status: EstimateStatus,
    pub screens: Vec<ScreenResponse>,
    pub events: Vec<EventResponse>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedEstimateResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub inquiry: String,
    pub status: EstimateStatus,
    pub screen: ScreenResponse,
}

// ---------------------------------------------------------------------------
// Order proposals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProposedScreen {
    #[serde(alias = "name")]
    #[validate(length(min = 1, max = 255, message = "Screen title cannot be empty"))]
    pub title: String,
    #[serde(default)]
    pub catchphrase: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "html")]
    pub preview: String,
    #[serde(default)]
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProposedEvent {
    #[validate(length(min = 1, max = 255, message = "Event name cannot be empty"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "Event screen is too long"))]
    pub screen: String,
    #[serde(default)]
    pub process: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProposedEntity {
    #[validate(length(min = 1, max = 255, message = "Entity name cannot be empty"))]
    pub name: String,
    #[serde(default = "empty_attributes")]
    pub attributes: Value,
}

fn empty_attributes() -> Value {
    Value::Array(Vec::new())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProposedRelation {
    #[serde(rename = "from", alias = "from_")]
    #[validate(length(min = 1, max = 255, message = "Relation source must be 1-255 characters"))]
    pub from: String,
    #[validate(length(min = 1, max = 255, message = "Relation target must be 1-255 characters"))]
    pub to: String,
    #[serde(rename = "type", default)]
    #[validate(length(max = 100, message = "Relation type is too long"))]
    pub relation_type: String,
}

/// Screens, events, entities and relations proposed for an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrderProposal {
    #[serde(default)]
    #[validate(nested)]
    pub screens: Vec<ProposedScreen>,
    #[serde(default)]
    #[validate(nested)]
    pub events: Vec<ProposedEvent>,
    #[serde(default)]
    #[validate(nested)]
    pub entities: Vec<ProposedEntity>,
    #[serde(default)]
    #[validate(nested)]
    pub relations: Vec<ProposedRelation>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AcceptOrderRequest {
    #[serde(alias = "inquiryId", alias = "estimate_id")]
    pub inquiry_id: i64,
    #[serde(flatten)]
    #[validate(nested)]
    pub proposal: OrderProposal,
    #[serde(default, alias = "aiResponse", alias = "ai_estimate")]
    pub ai_response: Option<AiResponsePayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptOrderResponse {
    pub inquiry_id: i64,
    pub status: EstimateStatus,
    pub screens_created: usize,
    pub events_created: usize,
    pub entities_created: usize,
    pub relations_created: usize,
    pub ai_response_saved: bool,
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveDraftRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub answers: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveDraftResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadDraftResponse {
    pub answers: Value,
}
