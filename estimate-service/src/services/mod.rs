//! Services for estimate-service.

pub mod analysis;
pub mod database;
pub mod drafts;
pub mod estimator;
pub mod listing;
pub mod metrics;
pub mod preview;
pub mod prompts;
pub mod providers;
pub mod repository;
pub mod simulation;
pub mod templates;

pub use database::Database;
pub use drafts::{DraftStore, InMemoryDraftStore};
pub use estimator::EstimateGenerator;
pub use preview::PreviewGenerator;
pub use providers::{mock::MockCompletionProvider, openai::OpenAiProvider, CompletionProvider};
pub use repository::{InquiryStore, NewInquiry, OrderRows};
