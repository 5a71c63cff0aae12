//! Ephemeral form-draft storage.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

/// Storage for questionnaire drafts keyed by an opaque id.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Stores `answers` under `id` when that id is known, otherwise under a
    /// freshly issued id. Returns the id used.
    async fn save(&self, id: Option<String>, answers: Value) -> String;

    async fn load(&self, id: &str) -> Option<Value>;
}

/// Process-lifetime draft store.
#[derive(Default)]
pub struct InMemoryDraftStore {
    drafts: DashMap<String, Value>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn save(&self, id: Option<String>, answers: Value) -> String {
        if let Some(id) = id {
            if let Some(mut existing) = self.drafts.get_mut(&id) {
                *existing = answers;
                return id;
            }
        }

        let id = Uuid::new_v4().to_string();
        self.drafts.insert(id.clone(), answers);
        id
    }

    async fn load(&self, id: &str) -> Option<Value> {
        self.drafts.get(id).map(|entry| entry.value().clone())
    }
}
