#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use estimate_service::models::{
    AcceptOrderResponse, AiResponse, AiResponsePayload, Entity, Estimate, EstimateStatus, Event,
    InquiryRecord, OrderProposal, Relation, Screen,
};
use estimate_service::services::{
    InMemoryDraftStore, InquiryStore, MockCompletionProvider, NewInquiry, OrderRows,
};
use estimate_service::startup::{router, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use service_core::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const SAMPLE_ANSWERS: &str = r#"{"1": "社内業務の効率化", "2": "データ入力・管理", "3": ["PC", "スマートフォン"], "4": 50}"#;

#[derive(Default)]
struct Tables {
    next_id: i64,
    estimates: Vec<Estimate>,
    screens: Vec<Screen>,
    events: Vec<Event>,
    entities: Vec<Entity>,
    relations: Vec<Relation>,
    ai_responses: Vec<AiResponse>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn record(&self, estimate: &Estimate) -> InquiryRecord {
        InquiryRecord {
            estimate: estimate.clone(),
            screens: self
                .screens
                .iter()
                .filter(|s| s.estimate_id == estimate.id)
                .cloned()
                .collect(),
            events: self
                .events
                .iter()
                .filter(|e| e.estimate_id == estimate.id)
                .cloned()
                .collect(),
        }
    }
}

/// Inquiry store backed by plain vectors, mirroring the Postgres schema.
#[derive(Default)]
pub struct InMemoryInquiryStore {
    tables: Mutex<Tables>,
    unhealthy: AtomicBool,
}

impl InMemoryInquiryStore {
    pub fn set_unhealthy(&self) {
        self.unhealthy.store(true, Ordering::SeqCst);
    }

    /// Total number of child rows across all order tables.
    pub fn child_row_count(&self) -> usize {
        let tables = self.tables.lock().unwrap();
        tables.screens.len()
            + tables.events.len()
            + tables.entities.len()
            + tables.relations.len()
            + tables.ai_responses.len()
    }

    pub fn status_of(&self, id: i64) -> Option<EstimateStatus> {
        let tables = self.tables.lock().unwrap();
        tables
            .estimates
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.status)
    }

    /// Inserts a screen row directly, bypassing order acceptance.
    pub fn insert_screen(&self, estimate_id: i64, title: &str, catchphrase: Option<&str>) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.screens.push(Screen {
            id,
            estimate_id,
            title: title.to_string(),
            catchphrase: catchphrase.map(str::to_string),
            description: None,
            preview: Some(String::new()),
        });
        id
    }
}

#[async_trait]
impl InquiryStore for InMemoryInquiryStore {
    async fn create_inquiry(&self, inquiry: NewInquiry) -> Result<InquiryRecord, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let estimate = Estimate {
            id,
            name: inquiry.name,
            email: inquiry.email,
            inquiry: inquiry.inquiry,
            answers: Some(inquiry.answers),
            status: EstimateStatus::Pending,
            requirements_specification: Some(inquiry.requirements_specification),
            requirements_definition: Some(inquiry.requirements_definition),
            screens: Some(inquiry.screens),
            estimate_develop: Some(inquiry.estimate_develop),
            created_at: Utc::now(),
        };
        tables.estimates.push(estimate.clone());
        Ok(tables.record(&estimate))
    }

    async fn list_inquiries(&self) -> Result<Vec<InquiryRecord>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .estimates
            .iter()
            .rev()
            .map(|e| tables.record(e))
            .collect())
    }

    async fn get_inquiry(&self, id: i64) -> Result<Option<InquiryRecord>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .estimates
            .iter()
            .find(|e| e.id == id)
            .map(|e| tables.record(e)))
    }

    async fn accept_order(
        &self,
        inquiry_id: i64,
        proposal: &OrderProposal,
        ai_response: Option<&AiResponsePayload>,
    ) -> Result<AcceptOrderResponse, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(estimate) = tables.estimates.iter_mut().find(|e| e.id == inquiry_id) else {
            return Err(AppError::NotFound(anyhow::anyhow!(
                "Inquiry {} not found",
                inquiry_id
            )));
        };
        estimate.status = EstimateStatus::Accepted;

        for screen in &proposal.screens {
            let id = tables.next_id();
            tables.screens.push(Screen {
                id,
                estimate_id: inquiry_id,
                title: screen.title.clone(),
                catchphrase: screen.catchphrase.clone(),
                description: screen.description.clone(),
                preview: Some(screen.preview.clone()),
            });
        }
        for event in &proposal.events {
            let id = tables.next_id();
            tables.events.push(Event {
                id,
                estimate_id: inquiry_id,
                name: event.name.clone(),
                screen: event.screen.clone(),
                process: event.process.clone(),
            });
        }
        for entity in &proposal.entities {
            let id = tables.next_id();
            tables.entities.push(Entity {
                id,
                estimate_id: inquiry_id,
                name: entity.name.clone(),
                attributes: entity.attributes.clone(),
            });
        }
        for relation in &proposal.relations {
            let id = tables.next_id();
            tables.relations.push(Relation {
                id,
                estimate_id: inquiry_id,
                from_entity: relation.from.clone(),
                to_entity: relation.to.clone(),
                relation_type: relation.relation_type.clone(),
            });
        }
        if let Some(payload) = ai_response {
            let (screens, events, database) = match payload {
                AiResponsePayload::Structured(estimate) => (
                    serde_json::to_value(&estimate.screens)?,
                    serde_json::to_value(&estimate.events)?,
                    estimate.database.as_ref().map(serde_json::to_value).transpose()?,
                ),
                AiResponsePayload::FreeForm(_) => (Value::Object(Default::default()), Value::Object(Default::default()), None),
            };
            tables.ai_responses.retain(|r| r.estimate_id != inquiry_id);
            let id = tables.next_id();
            tables.ai_responses.push(AiResponse {
                id,
                estimate_id: inquiry_id,
                screens,
                events,
                database,
                raw_response: payload.raw_text(),
                created_at: Utc::now(),
            });
        }

        Ok(AcceptOrderResponse {
            inquiry_id,
            status: EstimateStatus::Accepted,
            screens_created: proposal.screens.len(),
            events_created: proposal.events.len(),
            entities_created: proposal.entities.len(),
            relations_created: proposal.relations.len(),
            ai_response_saved: ai_response.is_some(),
        })
    }

    async fn list_accepted(&self) -> Result<Vec<InquiryRecord>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .estimates
            .iter()
            .filter(|e| e.status == EstimateStatus::Accepted)
            .map(|e| tables.record(e))
            .collect())
    }

    async fn order_rows(&self, inquiry_id: i64) -> Result<OrderRows, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(OrderRows {
            screens: tables.screens.iter().filter(|r| r.estimate_id == inquiry_id).cloned().collect(),
            events: tables.events.iter().filter(|r| r.estimate_id == inquiry_id).cloned().collect(),
            entities: tables.entities.iter().filter(|r| r.estimate_id == inquiry_id).cloned().collect(),
            relations: tables.relations.iter().filter(|r| r.estimate_id == inquiry_id).cloned().collect(),
            ai_response: tables.ai_responses.iter().find(|r| r.estimate_id == inquiry_id).cloned(),
        })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        if self.unhealthy.load(Ordering::SeqCst) {
            Err(AppError::DatabaseError(anyhow::anyhow!("store unavailable")))
        } else {
            Ok(())
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryInquiryStore>,
    pub provider: Arc<MockCompletionProvider>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_provider(MockCompletionProvider::new(true))
    }

    pub fn with_provider(provider: MockCompletionProvider) -> Self {
        let store = Arc::new(InMemoryInquiryStore::default());
        let provider = Arc::new(provider);
        let state = AppState::new(
            store.clone(),
            Arc::new(InMemoryDraftStore::new()),
            provider.clone(),
        );

        Self {
            router: router(state),
            store,
            provider,
        }
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(path, body.to_string()).await
    }

    pub async fn post_raw(&self, path: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        send(&self.router, request).await
    }

    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        send(&self.router, request).await
    }

    /// Submits an inquiry and returns its id.
    pub async fn submit_inquiry(&self, name: &str) -> i64 {
        let (status, body) = self
            .post_json(
                "/submit_inquiry",
                serde_json::json!({
                    "name": name,
                    "email": "customer@example.com",
                    "message": "見積もりをお願いします",
                    "simulationResult": {
                        "requirements_specification": "仕様",
                        "requirements_definition": "定義",
                        "screens": ["ログイン画面"],
                        "estimate_develop": "合計: 30人日",
                        "answers": {"1": "社内業務の効率化"}
                    }
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().unwrap()
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub fn sample_answers() -> Value {
    serde_json::from_str(SAMPLE_ANSWERS).unwrap()
}

pub fn order_payload(inquiry_id: i64) -> Value {
    serde_json::json!({
        "inquiry_id": inquiry_id,
        "screens": [
            {"title": "ログイン", "catchphrase": "安全にログイン", "preview": "<form></form>", "events": ["login"]},
            {"title": "一覧", "preview": "<table></table>"}
        ],
        "events": [{"name": "login", "screen": "ログイン", "process": "認証する"}],
        "entities": [{"name": "User", "attributes": ["id", "email"]}],
        "relations": [{"from": "User", "to": "Order", "type": "1:N"}],
        "ai_response": "全体で20人日"
    })
}
