//! Storage seam for inquiries and their order children.

use crate::models::{
    AcceptOrderResponse, AiResponse, AiResponsePayload, Entity, Event, InquiryRecord,
    OrderProposal, Relation, Screen, SubmitInquiryRequest,
};
use async_trait::async_trait;
use service_core::error::AppError;

/// Fields of a newly submitted inquiry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub inquiry: String,
    /// Answers as a JSON object string.
    pub answers: String,
    pub requirements_specification: String,
    pub requirements_definition: String,
    /// Screen names as a JSON array string.
    pub screens: String,
    pub estimate_develop: String,
}

impl NewInquiry {
    pub fn from_request(request: &SubmitInquiryRequest) -> Result<Self, AppError> {
        let summary = &request.simulation_result;
        Ok(Self {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            inquiry: request.message.clone(),
            answers: serde_json::to_string(&summary.answers)?,
            requirements_specification: summary.requirements_specification.clone(),
            requirements_definition: summary.requirements_definition.clone(),
            screens: serde_json::to_string(&summary.screens)?,
            estimate_develop: summary.estimate_develop.clone(),
        })
    }
}

/// Every row written for an inquiry by order acceptance.
#[derive(Debug, Clone, Default)]
pub struct OrderRows {
    pub screens: Vec<Screen>,
    pub events: Vec<Event>,
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
    pub ai_response: Option<AiResponse>,
}

/// Persistence operations behind the inquiry endpoints.
#[async_trait]
pub trait InquiryStore: Send + Sync {
    /// Inserts a pending inquiry.
    async fn create_inquiry(&self, inquiry: NewInquiry) -> Result<InquiryRecord, AppError>;

    /// All inquiries, newest first, with their screens and events.
    async fn list_inquiries(&self) -> Result<Vec<InquiryRecord>, AppError>;

    async fn get_inquiry(&self, id: i64) -> Result<Option<InquiryRecord>, AppError>;

    /// Marks the inquiry accepted and inserts every proposed child row in one
    /// transaction. Unknown ids yield `AppError::NotFound` with nothing written.
    async fn accept_order(
        &self,
        inquiry_id: i64,
        proposal: &OrderProposal,
        ai_response: Option<&AiResponsePayload>,
    ) -> Result<AcceptOrderResponse, AppError>;

    /// Accepted inquiries with their screens in insertion order.
    async fn list_accepted(&self) -> Result<Vec<InquiryRecord>, AppError>;

    /// Child rows and AI response stored for `inquiry_id`.
    async fn order_rows(&self, inquiry_id: i64) -> Result<OrderRows, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
