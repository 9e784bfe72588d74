//! Liveness and readiness endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
pub async fn health_ping() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /health/ready
///
/// Ready only when the document store answers a trivial query.
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(latency) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ready".to_string(),
                database: "healthy".to_string(),
                response_time_ms: Some(latency.as_millis() as u64),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!("readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    status: "not ready".to_string(),
                    database: "unhealthy".to_string(),
                    response_time_ms: None,
                    error: Some("database unreachable".to_string()),
                }),
            )
        }
    }
}
