//! Pattern catalog CRUD endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use logsonic_types::{GrokPatternDefinition, GrokPatternResponse, PatternType};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Body of `POST /grok`.
#[derive(Debug, Default, Deserialize)]
pub struct GrokPatternBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    priority: i32,
    #[serde(default)]
    custom_patterns: BTreeMap<String, String>,
    #[serde(default)]
    pattern: String,
    #[serde(default)]
    description: String,
}

/// Query of `DELETE /grok`.
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    name: String,
}

/// Handle `GET /api/v1/grok` - list the catalog.
pub async fn list_patterns(State(state): State<Arc<AppState>>) -> Json<GrokPatternResponse> {
    Json(GrokPatternResponse {
        status: "success".to_string(),
        patterns: state.catalog.get_all(),
        error: String::new(),
    })
}

/// Handle `POST /api/v1/grok` - add a user-defined pattern.
pub async fn create_pattern(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GrokPatternBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<GrokPatternResponse>)> {
    let Json(request) = body.map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    if request.name.is_empty() {
        return Err(ApiError::InvalidParameter {
            name: "name",
            reason: "pattern name is required".to_string(),
        });
    }

    let mut def = GrokPatternDefinition::new(request.name, request.pattern)
        .with_priority(request.priority)
        .with_description(request.description)
        .with_type(PatternType::Custom);
    def.custom_patterns = request.custom_patterns;

    state.catalog.add(def.clone())?;

    Ok((
        StatusCode::CREATED,
        Json(GrokPatternResponse {
            status: "success".to_string(),
            patterns: vec![def],
            error: String::new(),
        }),
    ))
}

/// Handle `DELETE /api/v1/grok?name=` - remove a pattern by name.
pub async fn delete_pattern(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeleteQuery>,
) -> ApiResult<Json<GrokPatternResponse>> {
    state.catalog.delete(&query.name)?;
    Ok(Json(GrokPatternResponse {
        status: "success".to_string(),
        patterns: Vec::new(),
        error: format!("Pattern '{}' has been deleted", query.name),
    }))
}
