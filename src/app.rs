//! Application wiring: shared state and the HTTP router.

use crate::ai::{AnalysisService, OpenAiResponsesClient};
use crate::config::Config;
use crate::handlers;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Upper bound on request bodies; reports carry base64-encoded page images.
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Read-only state shared by all requests.
pub struct AppState {
    pub analysis: Box<dyn AnalysisService>,
}

/// Injectable service bundle used to construct [`AppState`] in tests/harnesses.
pub struct AppServices {
    pub analysis: Box<dyn AnalysisService>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build state backed by the OpenAI Responses API.
    pub fn new(config: &Config) -> SharedState {
        tracing::info!(
            "Analysis provider: OpenAI (base URL: {}, default model: {})",
            config.openai_base_url,
            config.presets.default_model()
        );
        Self::with_services(AppServices {
            analysis: Box::new(OpenAiResponsesClient::new(config)),
        })
    }

    pub fn with_services(services: AppServices) -> SharedState {
        Arc::new(Self {
            analysis: services.analysis,
        })
    }
}

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/analyze", post(handlers::analyze))
        .route("/create-report", post(handlers::create_report))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
