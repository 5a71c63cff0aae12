//! Application startup and lifecycle management.

use crate::config::{EstimateConfig, ProviderKind};
use crate::handlers;
use crate::services::providers::openai::OpenAiConfig;
use crate::services::{
    CompletionProvider, Database, DraftStore, EstimateGenerator, InMemoryDraftStore, InquiryStore,
    MockCompletionProvider, OpenAiProvider, PreviewGenerator,
};
use axum::{
    extract::Request,
    middleware,
    routing::{get, post},
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InquiryStore>,
    pub drafts: Arc<dyn DraftStore>,
    pub provider: Arc<dyn CompletionProvider>,
    pub estimator: EstimateGenerator,
    pub previews: PreviewGenerator,
}

impl AppState {
    pub fn new(
        store: Arc<dyn InquiryStore>,
        drafts: Arc<dyn DraftStore>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            store,
            drafts,
            estimator: EstimateGenerator::new(provider.clone()),
            previews: PreviewGenerator::new(provider.clone()),
            provider,
        }
    }
}

/// Builds the HTTP router with every endpoint and the shared middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/estimate", post(handlers::estimate::estimate))
        .route("/screen_details", post(handlers::estimate::screen_details))
        .route("/preview", post(handlers::preview::preview))
        .route("/simulate", post(handlers::preview::simulate))
        .route("/submit_inquiry", post(handlers::inquiry::submit_inquiry))
        .route("/api/inquiries", get(handlers::inquiry::list_inquiries))
        .route("/api/inquirydetail/:id", get(handlers::inquiry::inquiry_detail))
        .route("/api/estimate", post(handlers::estimate::order_estimate))
        .route("/api/accept-order", post(handlers::inquiry::accept_order))
        .route("/api/ordered_estimates", get(handlers::inquiry::ordered_estimates))
        .route("/save", post(handlers::drafts::save_draft))
        .route("/load/:id", get(handlers::drafts::load_draft))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::health::metrics_endpoint))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
            let request_id = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri(),
                request_id = %request_id,
            )
        }))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

fn build_provider(config: &EstimateConfig) -> Result<Arc<dyn CompletionProvider>, AppError> {
    let completion = &config.completion;
    match completion.provider {
        ProviderKind::OpenAi => {
            let api_key = completion.api_key.clone().ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!("OPENAI_API_KEY is required"))
            })?;
            let provider = OpenAiProvider::new(OpenAiConfig {
                api_key,
                base_url: completion.base_url.clone(),
                model: completion.model.clone(),
                timeout_secs: completion.timeout_secs,
            })?;
            tracing::info!(model = %completion.model, "Initialized OpenAI completion provider");
            Ok(Arc::new(provider))
        }
        ProviderKind::Mock => {
            tracing::warn!("Using mock completion provider");
            Ok(Arc::new(MockCompletionProvider::new(true)))
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: EstimateConfig) -> Result<Self, AppError> {
        let db = Database::new(
            config.database.url.expose_secret(),
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to PostgreSQL: {}", e);
            e
        })?;

        if config.database.run_migrations {
            db.run_migrations().await?;
        }

        let provider = build_provider(&config)?;
        let state = AppState::new(
            Arc::new(db),
            Arc::new(InMemoryDraftStore::new()),
            provider,
        );

        // Port 0 picks a random port for testing
        let addr = config.common.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Estimate service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the application state.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let app = router(self.state);

        axum::serve(self.listener, app).await.map_err(|e| {
            tracing::error!("HTTP server error: {}", e);
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}
