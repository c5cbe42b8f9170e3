use axum::extract::State;
use axum::{routing::get, Json, Router};
use leadflow_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub timestamp: Timestamp,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = leadflow_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        timestamp: chrono::Utc::now(),
        db_healthy,
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
