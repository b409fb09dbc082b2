//! Health and banner handlers

use axum::Json;
use serde::Serialize;

/// Banner response body
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    /// Human-readable status line
    pub message: String,
}

/// Health response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Root banner endpoint
pub async fn root() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "AudioDiary API is running".to_string(),
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
