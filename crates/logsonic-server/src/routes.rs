//! Route configuration for the `/api/v1` surface.

use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use logsonic_types::ErrorResponse;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    clear_logs, create_pattern, delete_pattern, ingest_end, ingest_logs, ingest_start,
    list_patterns, parse_or_suggest, ping, read_logs, spa_fallback, system_info,
};
use crate::state::AppState;

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let request_timeout = state.config.request_timeout;

    let api_routes = Router::new()
        // Health check
        .route("/ping", get(ping))
        // Ingest session endpoints
        .route("/ingest/start", post(ingest_start))
        .route("/ingest/logs", post(ingest_logs))
        .route("/ingest/end", post(ingest_end))
        // Parse / autosuggest
        .route("/parse", post(parse_or_suggest))
        // Query and clear
        .route("/logs", get(read_logs).delete(clear_logs))
        // System summary
        .route("/info", get(system_info))
        // Catalog CRUD
        .route(
            "/grok",
            get(list_patterns).post(create_pattern).delete(delete_pattern),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .fallback(spa_fallback)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}

/// CORS restricted to localhost origins on any port.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| {
                    o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1")
                })
                .unwrap_or(false)
        }))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// JSON envelope for requests hitting a known path with the wrong method.
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            status: "error".to_string(),
            error: "Method not allowed".to_string(),
            code: "METHOD_NOT_ALLOWED".to_string(),
            details: String::new(),
        }),
    )
}
