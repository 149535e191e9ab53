//! Status HTTP Routes
//!
//! Root banner, health check, and the not-found fallback.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::envelope::{self, StatusEnvelope};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create status routes (`/` and `/health`)
pub fn status_routes() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}

async fn root_handler() -> impl IntoResponse {
    let response = StatusEnvelope {
        success: true,
        message: "Server is Running!".to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Fallback for unmatched routes
pub async fn route_not_found() -> Response {
    envelope::rejected(StatusCode::NOT_FOUND, "Route not found")
}
