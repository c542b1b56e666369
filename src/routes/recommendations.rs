use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::Recommendation,
    routes::AppState,
};

pub const INVALID_USER_ID: &str = "Invalid userId";
pub const INVALID_COUNT: &str = "Invalid number of recommendations";

/// Parses a path segment as a non-negative 64-bit integer
fn parse_param(raw: &str, message: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|value| *value >= 0)
        .ok_or_else(|| AppError::InvalidInput(message.to_string()))
}

/// Handler for `GET /recommendations/:user_id/:n`
///
/// Segments are taken as strings so malformed values get our own error body
/// rather than the extractor's rejection.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((raw_user_id, raw_n)): Path<(String, String)>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let user_id = parse_param(&raw_user_id, INVALID_USER_ID)?;
    let n = parse_param(&raw_n, INVALID_COUNT)?;

    let recommendations = state.recommendations.recommend(user_id, n).await?;

    tracing::info!(
        request_id = %request_id,
        user_id,
        requested = n,
        returned = recommendations.len(),
        "Served recommendations"
    );

    Ok(Json(recommendations))
}
