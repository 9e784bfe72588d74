//! API route handlers.

pub mod auth;
pub mod contact;
pub mod health;
pub mod newsletter;
pub mod portfolio;

use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// GET /api/
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "NeXLet API - Where Code Meets Creativity".to_string(),
    })
}
