use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    db::RecommendationRepo,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{LookupPolicy, RecommendationService},
};

pub mod recommendations;

/// Shared application state
///
/// The repository is injected here once and handed to each request;
/// handlers never reach for a global connection.
pub struct AppState {
    pub repo: Arc<dyn RecommendationRepo>,
    pub recommendations: RecommendationService,
}

impl AppState {
    pub fn new(repo: Arc<dyn RecommendationRepo>, policy: LookupPolicy) -> Self {
        Self {
            recommendations: RecommendationService::new(repo.clone(), policy),
            repo,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/recommendations/:user_id/:n",
            get(recommendations::recommend),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET]),
                ),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match state.repo.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "healthy" }))),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy" })),
            )
        }
    }
}
