//! Item list endpoints
//!
//! `/fetch` returns the whole list; `/post` replaces it. Pre-flight
//! `OPTIONS /post` is answered by the CORS layer before reaching a handler.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{any, post},
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::Item;

/// Methods advertised on `/post` responses
pub const POST_ALLOW_METHODS: &str = "POST, OPTIONS";

/// Request headers advertised on `/post` responses
pub const POST_ALLOW_HEADERS: &str = "Content-Type, Content-Length";

/// /fetch - list all items (any method)
async fn fetch_items(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.list().await.map_err(ApiError::Unavailable)?;

    // Console echo of what was served
    if tracing::enabled!(tracing::Level::DEBUG) {
        if let Ok(pretty) = serde_json::to_string_pretty(&items) {
            tracing::debug!(count = items.len(), "fetched items\n{}", pretty);
        }
    }

    Ok(Json(items))
}

/// POST /post - replace all items
///
/// The body is decoded regardless of `Content-Type`. Nothing is written
/// unless the whole body is a valid JSON array of items.
async fn replace_items(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let items: Vec<Item> = serde_json::from_slice(&body)?;

    let written = state
        .store
        .replace(&items)
        .await
        .map_err(ApiError::Database)?;
    tracing::info!(written, "replaced item list");

    Ok((
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, POST_ALLOW_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, POST_ALLOW_HEADERS),
        ],
    ))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/fetch", any(fetch_items))
        .route("/post", post(replace_items))
}
