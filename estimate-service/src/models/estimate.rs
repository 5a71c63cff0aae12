//! Persisted inquiry records and their child rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Inquiry lifecycle. Stored as INTEGER and serialized as its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum EstimateStatus {
    Pending = 0,
    Accepted = 1,
    Ordered = 2,
    Completed = 3,
    Cancelled = 4,
}

impl EstimateStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Ordered => "ordered",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl From<EstimateStatus> for i32 {
    fn from(status: EstimateStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i32> for EstimateStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Accepted),
            2 => Ok(Self::Ordered),
            3 => Ok(Self::Completed),
            4 => Ok(Self::Cancelled),
            other => Err(format!("unknown estimate status code {}", other)),
        }
    }
}

impl fmt::Display for EstimateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Row of `estimate_data`.
#[derive(Debug, Clone, FromRow)]
pub struct Estimate {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub inquiry: String,
    pub answers: Option<String>,
    pub status: EstimateStatus,
    pub requirements_specification: Option<String>,
    pub requirements_definition: Option<String>,
    pub screens: Option<String>,
    pub estimate_develop: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row of `screen_data`.
#[derive(Debug, Clone, FromRow)]
pub struct Screen {
    pub id: i64,
    pub estimate_id: i64,
    pub title: String,
    pub catchphrase: Option<String>,
    pub description: Option<String>,
    pub preview: Option<String>,
}

impl Screen {
    /// Count of non-empty descriptive fields (catchphrase, description, preview).
    pub fn richness(&self) -> usize {
        [&self.catchphrase, &self.description, &self.preview]
            .into_iter()
            .filter(|field| field.as_deref().is_some_and(|s| !s.trim().is_empty()))
            .count()
    }
}

/// Row of `events`.
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: i64,
    pub estimate_id: i64,
    pub name: String,
    pub screen: String,
    pub process: String,
}

/// Row of `entities`.
#[derive(Debug, Clone, FromRow)]
pub struct Entity {
    pub id: i64,
    pub estimate_id: i64,
    pub name: String,
    pub attributes: serde_json::Value,
}

/// Row of `relations`.
#[derive(Debug, Clone, FromRow)]
pub struct Relation {
    pub id: i64,
    pub estimate_id: i64,
    pub from_entity: String,
    pub to_entity: String,
    pub relation_type: String,
}

/// Row of `ai_responses`.
#[derive(Debug, Clone, FromRow)]
pub struct AiResponse {
    pub id: i64,
    pub estimate_id: i64,
    pub screens: serde_json::Value,
    pub events: serde_json::Value,
    pub database: Option<serde_json::Value>,
    pub raw_response: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An estimate together with the children shown in listings.
#[derive(Debug, Clone)]
pub struct InquiryRecord {
    pub estimate: Estimate,
    pub screens: Vec<Screen>,
    pub events: Vec<Event>,
}
