// src/handlers/mod.rs
pub mod reply_handlers;
pub mod thread_handlers;

use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe for deployments.
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
