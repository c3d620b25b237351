// Name handlers
// HTTP handlers for baby name rank lookups

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{debug, info};

use crate::{
    error::{ApiError, ApiResult},
    handlers::SharedRepository,
    models::{normalize_name, ListNamesQuery, NameListResponse},
};

/// Get rank information for a single name
/// GET /api/v1/names/:name
pub async fn get_name(
    State(repo): State<SharedRepository>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    // Undecodable segments such as `%FF` get the JSON error shape too
    let Path(raw_name) = path.map_err(|rejection| {
        debug!("Rejected name path: {}", rejection.body_text());
        ApiError::validation("Name parameter must be valid UTF-8")
    })?;

    let name = normalize_name(&raw_name)
        .ok_or_else(|| ApiError::validation("Name parameter is required"))?;

    info!("Looking up rank for name: {}", name);

    let record = repo
        .lookup_by_name(name)
        .await?
        .ok_or_else(|| ApiError::name_not_found(name))?;

    Ok((StatusCode::OK, Json(record)))
}

/// GET /api/v1/names/ (empty name segment)
pub async fn missing_name() -> ApiError {
    ApiError::validation("Name parameter is required")
}

/// List names ordered by rank
/// GET /api/v1/names?limit=N
pub async fn list_names(
    State(repo): State<SharedRepository>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<impl IntoResponse> {
    let limit = ListNamesQuery::from_pairs(&params).limit();
    info!("Listing top {} names", limit.get());

    let names = repo.list_top(limit.get()).await?;

    info!("Retrieved {} names", names.len());
    Ok((StatusCode::OK, Json(NameListResponse::from(names))))
}
