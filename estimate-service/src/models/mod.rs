//! Domain models for estimate-service.

pub mod ai_estimate;
pub mod answers;
pub mod dto;
pub mod estimate;

pub use ai_estimate::{extract_json_block, AiEstimate, AiResponsePayload, WorkItemEstimate};
pub use answers::Answers;
pub use dto::*;
pub use estimate::{
    AiResponse, Entity, Estimate, EstimateStatus, Event, InquiryRecord, Relation, Screen,
};
