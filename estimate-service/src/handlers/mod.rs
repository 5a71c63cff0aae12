//! HTTP handlers for estimate-service.

pub mod drafts;
pub mod estimate;
pub mod health;
pub mod inquiry;
pub mod preview;
