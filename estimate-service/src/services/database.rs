//! PostgreSQL-backed inquiry store.

use super::metrics::DB_QUERY_DURATION;
use super::repository::{InquiryStore, NewInquiry, OrderRows};
use crate::models::{
    AcceptOrderResponse, AiResponse, AiResponsePayload, Entity, Estimate, EstimateStatus, Event,
    InquiryRecord, OrderProposal, Relation, Screen,
};
use async_trait::async_trait;
use serde_json::Value;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, instrument, warn};

const ESTIMATE_COLUMNS: &str = "id, name, email, inquiry, answers, status, \
     requirements_specification, requirements_definition, screens, estimate_develop, created_at";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "estimate-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Attaches screens and events to each estimate, preserving row order.
    async fn with_children(&self, estimates: Vec<Estimate>) -> Result<Vec<InquiryRecord>, AppError> {
        if estimates.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = estimates.iter().map(|e| e.id).collect();

        let screens = sqlx::query_as::<_, Screen>(
            r#"
            SELECT id, estimate_id, title, catchphrase, description, preview
            FROM screen_data
            WHERE estimate_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to load screens: {}", e)))?;

        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, estimate_id, name, screen, process
            FROM events
            WHERE estimate_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to load events: {}", e)))?;

        let mut screens_by_estimate: HashMap<i64, Vec<Screen>> = HashMap::new();
        for screen in screens {
            screens_by_estimate
                .entry(screen.estimate_id)
                .or_default()
                .push(screen);
        }
        let mut events_by_estimate: HashMap<i64, Vec<Event>> = HashMap::new();
        for event in events {
            events_by_estimate
                .entry(event.estimate_id)
                .or_default()
                .push(event);
        }

        Ok(estimates
            .into_iter()
            .map(|estimate| InquiryRecord {
                screens: screens_by_estimate.remove(&estimate.id).unwrap_or_default(),
                events: events_by_estimate.remove(&estimate.id).unwrap_or_default(),
                estimate,
            })
            .collect())
    }

    async fn insert_children(
        tx: &mut Transaction<'_, Postgres>,
        inquiry_id: i64,
        proposal: &OrderProposal,
    ) -> Result<(), AppError> {
        for screen in &proposal.screens {
            sqlx::query(
                r#"
                INSERT INTO screen_data (estimate_id, title, catchphrase, description, preview)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(inquiry_id)
            .bind(&screen.title)
            .bind(&screen.catchphrase)
            .bind(&screen.description)
            .bind(&screen.preview)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to insert screen: {}", e)))?;
        }

        for event in &proposal.events {
            sqlx::query(
                r#"
                INSERT INTO events (estimate_id, name, screen, process)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(inquiry_id)
            .bind(&event.name)
            .bind(&event.screen)
            .bind(&event.process)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to insert event: {}", e)))?;
        }

        for entity in &proposal.entities {
            sqlx::query(
                r#"
                INSERT INTO entities (estimate_id, name, attributes)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(inquiry_id)
            .bind(&entity.name)
            .bind(&entity.attributes)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to insert entity: {}", e)))?;
        }

        for relation in &proposal.relations {
            sqlx::query(
                r#"
                INSERT INTO relations (estimate_id, from_entity, to_entity, relation_type)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(inquiry_id)
            .bind(&relation.from)
            .bind(&relation.to)
            .bind(&relation.relation_type)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to insert relation: {}", e))
            })?;
        }

        Ok(())
    }

    /// Inserts or replaces the single AI response of an inquiry.
    async fn upsert_ai_response(
        tx: &mut Transaction<'_, Postgres>,
        inquiry_id: i64,
        payload: &AiResponsePayload,
    ) -> Result<(), AppError> {
        let (screens, events, database) = match payload {
            AiResponsePayload::Structured(estimate) => (
                serde_json::to_value(&estimate.screens)?,
                serde_json::to_value(&estimate.events)?,
                estimate
                    .database
                    .as_ref()
                    .map(serde_json::to_value)
                    .transpose()?,
            ),
            AiResponsePayload::FreeForm(_) => (
                Value::Object(Default::default()),
                Value::Object(Default::default()),
                None,
            ),
        };

        sqlx::query(
            r#"
            INSERT INTO ai_responses (estimate_id, screens, events, database, raw_response)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (estimate_id) DO UPDATE
            SET screens = EXCLUDED.screens,
                events = EXCLUDED.events,
                database = EXCLUDED.database,
                raw_response = EXCLUDED.raw_response,
                created_at = NOW()
            "#,
        )
        .bind(inquiry_id)
        .bind(screens)
        .bind(events)
        .bind(database)
        .bind(payload.raw_text())
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to save AI response: {}", e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl InquiryStore for Database {
    #[instrument(skip(self, inquiry), fields(email = %inquiry.email))]
    async fn create_inquiry(&self, inquiry: NewInquiry) -> Result<InquiryRecord, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_inquiry"])
            .start_timer();

        let estimate = sqlx::query_as::<_, Estimate>(&format!(
            r#"
            INSERT INTO estimate_data (name, email, inquiry, answers, status,
                requirements_specification, requirements_definition, screens, estimate_develop)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            ESTIMATE_COLUMNS
        ))
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.inquiry)
        .bind(&inquiry.answers)
        .bind(EstimateStatus::Pending)
        .bind(&inquiry.requirements_specification)
        .bind(&inquiry.requirements_definition)
        .bind(&inquiry.screens)
        .bind(&inquiry.estimate_develop)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create inquiry: {}", e)))?;

        timer.observe_duration();
        info!(inquiry_id = estimate.id, "Inquiry created");

        Ok(InquiryRecord {
            estimate,
            screens: Vec::new(),
            events: Vec::new(),
        })
    }

    #[instrument(skip(self))]
    async fn list_inquiries(&self) -> Result<Vec<InquiryRecord>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_inquiries"])
            .start_timer();

        let estimates = sqlx::query_as::<_, Estimate>(&format!(
            "SELECT {} FROM estimate_data ORDER BY created_at DESC, id DESC",
            ESTIMATE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list inquiries: {}", e)))?;

        let records = self.with_children(estimates).await?;
        timer.observe_duration();

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn get_inquiry(&self, id: i64) -> Result<Option<InquiryRecord>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_inquiry"])
            .start_timer();

        let estimate = sqlx::query_as::<_, Estimate>(&format!(
            "SELECT {} FROM estimate_data WHERE id = $1",
            ESTIMATE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get inquiry: {}", e)))?;

        let record = match estimate {
            Some(estimate) => self.with_children(vec![estimate]).await?.pop(),
            None => None,
        };
        timer.observe_duration();

        Ok(record)
    }

    #[instrument(
        skip(self, proposal, ai_response),
        fields(screens = proposal.screens.len(), events = proposal.events.len())
    )]
    async fn accept_order(
        &self,
        inquiry_id: i64,
        proposal: &OrderProposal,
        ai_response: Option<&AiResponsePayload>,
    ) -> Result<AcceptOrderResponse, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["accept_order"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let updated = sqlx::query_scalar::<_, i64>(
            "UPDATE estimate_data SET status = $1 WHERE id = $2 RETURNING id",
        )
        .bind(EstimateStatus::Accepted)
        .bind(inquiry_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update status: {}", e)))?;

        if updated.is_none() {
            tx.rollback().await.ok();
            warn!(inquiry_id, "Accept order for unknown inquiry");
            return Err(AppError::NotFound(anyhow::anyhow!(
                "Inquiry {} not found",
                inquiry_id
            )));
        }

        Self::insert_children(&mut tx, inquiry_id, proposal).await?;
        if let Some(payload) = ai_response {
            Self::upsert_ai_response(&mut tx, inquiry_id, payload).await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit transaction: {}", e))
        })?;

        timer.observe_duration();
        info!(inquiry_id, "Order accepted");

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

    #[instrument(skip(self))]
    async fn list_accepted(&self) -> Result<Vec<InquiryRecord>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_accepted"])
            .start_timer();

        let estimates = sqlx::query_as::<_, Estimate>(&format!(
            "SELECT {} FROM estimate_data WHERE status = $1 ORDER BY id",
            ESTIMATE_COLUMNS
        ))
        .bind(EstimateStatus::Accepted)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list accepted inquiries: {}", e))
        })?;

        let records = self.with_children(estimates).await?;
        timer.observe_duration();

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn order_rows(&self, inquiry_id: i64) -> Result<OrderRows, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["order_rows"])
            .start_timer();

        let screens = sqlx::query_as::<_, Screen>(
            "SELECT id, estimate_id, title, catchphrase, description, preview FROM screen_data WHERE estimate_id = $1 ORDER BY id",
        )
        .bind(inquiry_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to load screens: {}", e)))?;

        let events = sqlx::query_as::<_, Event>(
            "SELECT id, estimate_id, name, screen, process FROM events WHERE estimate_id = $1 ORDER BY id",
        )
        .bind(inquiry_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to load events: {}", e)))?;

        let entities = sqlx::query_as::<_, Entity>(
            "SELECT id, estimate_id, name, attributes FROM entities WHERE estimate_id = $1 ORDER BY id",
        )
        .bind(inquiry_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to load entities: {}", e)))?;

        let relations = sqlx::query_as::<_, Relation>(
            "SELECT id, estimate_id, from_entity, to_entity, relation_type FROM relations WHERE estimate_id = $1 ORDER BY id",
        )
        .bind(inquiry_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to load relations: {}", e)))?;

        let ai_response = sqlx::query_as::<_, AiResponse>(
            r#"
            SELECT id, estimate_id, screens, events, database, raw_response, created_at
            FROM ai_responses
            WHERE estimate_id = $1
            "#,
        )
        .bind(inquiry_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to load AI response: {}", e))
        })?;

        timer.observe_duration();

        Ok(OrderRows {
            screens,
            events,
            entities,
            relations,
            ai_response,
        })
    }

    /// Check database health.
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;

        timer.observe_duration();
        Ok(())
    }
}
