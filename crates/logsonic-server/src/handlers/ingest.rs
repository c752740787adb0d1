//! Ingest session endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use logsonic_types::{IngestOptions, IngestRequest, IngestResponse};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Handle `POST /api/v1/ingest/start` - create a session with a private
/// tokenizer.
pub async fn ingest_start(
    State(state): State<Arc<AppState>>,
    body: Result<Json<IngestOptions>, JsonRejection>,
) -> ApiResult<Json<IngestResponse>> {
    let Json(options) = body.map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    let session_id = state.sessions.start(options)?;

    Ok(Json(IngestResponse {
        status: "success".to_string(),
        processed: 0,
        failed: 0,
        session_id: session_id.to_string(),
    }))
}

/// Handle `POST /api/v1/ingest/logs` - parse a batch through the session
/// tokenizer and store the documents.
pub async fn ingest_logs(
    State(state): State<Arc<AppState>>,
    body: Result<Json<IngestRequest>, JsonRejection>,
) -> ApiResult<Json<IngestResponse>> {
    let Json(request) = body.map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    let (outcome, options) = state.sessions.ingest(&request.session_id, &request.logs)?;
    debug!(
        session_id = %request.session_id,
        processed = outcome.processed,
        failed = outcome.failed,
        "parsed ingest batch"
    );

    state
        .storage
        .store(&outcome.documents, &options.source)
        .map_err(|e| ApiError::Storage(e.to_string()))?;
    state.invalidate_info_cache();

    Ok(Json(IngestResponse {
        status: "success".to_string(),
        processed: outcome.processed,
        failed: outcome.failed,
        session_id: request.session_id,
    }))
}

/// Handle `POST /api/v1/ingest/end` - destroy a session.
///
/// A missing or malformed body is treated as success; ending an unknown
/// session is a no-op.
pub async fn ingest_end(
    State(state): State<Arc<AppState>>,
    body: Result<Json<IngestRequest>, JsonRejection>,
) -> Json<IngestResponse> {
    if let Ok(Json(request)) = body {
        if !request.session_id.is_empty() {
            state.sessions.end(&request.session_id);
        }
    }
    Json(IngestResponse {
        status: "success".to_string(),
        processed: 0,
        failed: 0,
        session_id: String::new(),
    })
}
