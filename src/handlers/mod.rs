// Handlers module
// HTTP handlers for the Backend API

pub mod names;

use std::sync::Arc;

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use serde_json::json;
use tracing::warn;

use crate::{db::NameRepository, error::ApiError, middleware::with_middleware};

/// Repository handle shared by every backend handler
pub type SharedRepository = Arc<dyn NameRepository>;

/// Create the Backend API router with all endpoints and middleware
pub fn create_router(repo: SharedRepository) -> Router {
    let router = Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Name lookup endpoints
        .route("/api/v1/names", get(names::list_names))
        .route("/api/v1/names/", get(names::missing_name))
        .route("/api/v1/names/:name", get(names::get_name))
        .fallback(endpoint_not_found)
        // Add shared state (name repository)
        .with_state(repo);

    with_middleware(router)
}

/// Health check handler
/// 200 when the Name Store answers a trivial query, 503 otherwise
pub async fn health_check(State(repo): State<SharedRepository>) -> impl IntoResponse {
    if repo.health_check().await {
        (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "database": "connected" })),
        )
    } else {
        warn!("Health check reports database disconnected");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unhealthy", "database": "disconnected" })),
        )
    }
}

/// Fallback for unmatched routes
pub async fn endpoint_not_found() -> ApiError {
    ApiError::EndpointNotFound
}
