//! Estimate Service library.
//!
//! Turns questionnaire answers into project estimates and screen previews
//! with an LLM completion service, and stores customer inquiries and
//! accepted orders in PostgreSQL.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
