//! Liveness endpoints
//!
//! `/test` answers any method and never touches storage. `/health` reports
//! whether storage answers a ping but always returns 200.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;

use crate::http::server::AppState;

/// Fixed body of the liveness probe
pub const TEST_BODY: &str = "hello world";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /test
async fn test() -> &'static str {
    TEST_BODY
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (status, database) = match state.store.ping().await {
        Ok(()) => ("ok", "connected"),
        Err(e) => {
            tracing::warn!("Health check ping failed: {}", e);
            ("degraded", "unreachable")
        }
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/test", any(test))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryItemStore;

    #[tokio::test]
    async fn test_returns_fixed_body() {
        assert_eq!(test().await, "hello world");
    }

    #[tokio::test]
    async fn health_reports_connected_store() {
        let state = Arc::new(AppState::new(Arc::new(MemoryItemStore::new())));
        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.database, "connected");
    }
}
