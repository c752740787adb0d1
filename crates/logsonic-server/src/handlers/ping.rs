//! Health check endpoint.

use axum::Json;

/// Handle `GET /api/v1/ping`.
pub async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "pong" }))
}
