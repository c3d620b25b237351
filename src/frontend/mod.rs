// Frontend service
// Renders the search page by proxying lookups to the Backend API

pub mod client;
pub mod page;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::info;

use crate::{
    handlers::endpoint_not_found,
    middleware::with_middleware,
    models::{first_param, normalize_name},
};

pub use client::{BackendClient, LookupOutcome};
pub use page::SearchPage;

#[derive(Debug, Clone)]
pub struct FrontendState {
    pub backend: BackendClient,
}

/// Create the frontend router with the page, its health check and middleware
pub fn create_frontend_router(backend: BackendClient) -> Router {
    let router = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .fallback(endpoint_not_found)
        .with_state(FrontendState { backend });

    with_middleware(router)
}

/// Search page
/// GET /?name=...
/// A repeated `name` key uses its first value.
pub async fn index(
    State(state): State<FrontendState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Html<String> {
    let page = match first_param(&params, "name").and_then(normalize_name) {
        None => SearchPage::empty(),
        Some(name) => {
            info!("Searching backend for name: {}", name);
            let outcome = state.backend.lookup(name).await;
            SearchPage::from_outcome(name, outcome)
        }
    };

    Html(page.render())
}

/// Liveness of the frontend process only; the backend is not contacted
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
