//! The read path: `GET /logs` and `DELETE /logs`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Months, Utc};
use logsonic_grok::parse_flexible;
use logsonic_types::LogResponse;
use serde::Deserialize;
use tracing::debug;

use crate::distribution::calculate_distribution;
use crate::error::{ApiError, ApiResult};
use crate::sort::sort_documents;
use crate::state::AppState;

/// Query parameters for `GET /logs`.
///
/// Numeric parameters arrive as strings so validation failures produce
/// the documented `INVALID_PARAMETER` envelope instead of a rejection.
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    limit: Option<String>,
    offset: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    query: Option<String>,
    #[serde(rename = "_src")]
    src: Option<String>,
}

/// Parses a date parameter, accepting any supported format plus bare Unix
/// seconds; unparseable values fall back to the default.
fn parse_date_param(raw: Option<&String>, default: DateTime<Utc>) -> DateTime<Utc> {
    raw.and_then(|value| parse_flexible(value)).unwrap_or(default)
}

/// Handle `GET /api/v1/logs`.
pub async fn read_logs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LogsQuery>,
) -> ApiResult<Json<LogResponse>> {
    let started = Instant::now();

    let limit = match params.limit.as_deref() {
        None => 1000,
        Some(raw) => match raw.parse::<usize>() {
            Ok(value) if value > 0 => value,
            _ => {
                return Err(ApiError::InvalidParameter {
                    name: "limit",
                    reason: "limit must be a positive integer".to_string(),
                })
            }
        },
    };

    let mut offset = match params.offset.as_deref() {
        None => 0,
        Some(raw) => match raw.parse::<usize>() {
            Ok(value) => value,
            Err(_) => {
                return Err(ApiError::InvalidParameter {
                    name: "offset",
                    reason: "offset must be a non-negative integer".to_string(),
                })
            }
        },
    };

    let sort_by = params.sort_by.unwrap_or_else(|| "timestamp".to_string());
    let sort_order = match params.sort_order.as_deref() {
        None => "desc".to_string(),
        Some(order @ ("asc" | "desc")) => order.to_string(),
        Some(_) => {
            return Err(ApiError::InvalidParameter {
                name: "sort_order",
                reason: "sort order must be 'asc' or 'desc'".to_string(),
            })
        }
    };

    let now = Utc::now();
    let start_date = parse_date_param(params.start_date.as_ref(), now - Months::new(12));
    let end_date = parse_date_param(params.end_date.as_ref(), now);

    let search_query = params.query.unwrap_or_default();
    let sources: Vec<String> = params
        .src
        .as_deref()
        .map(|raw| raw.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    let outcome = state
        .storage
        .search(&search_query, Some(start_date), Some(end_date), &sources)
        .await
        .map_err(|e| ApiError::Read(e.to_string()))?;

    let mut all_logs = outcome.documents;
    let total_count = all_logs.len();
    debug!(total_count, query = %search_query, "search complete");

    let available_columns = sort_documents(&mut all_logs, &sort_by, &sort_order);
    let log_distribution = calculate_distribution(&all_logs);

    let mut end_index = (offset + limit).min(total_count);
    if offset >= total_count {
        offset = 0;
        end_index = 0;
    }
    let page: Vec<_> = all_logs[offset..end_index].to_vec();

    Ok(Json(LogResponse {
        status: "success".to_string(),
        total_count,
        offset,
        limit,
        time_taken: i64::try_from(started.elapsed().as_micros()).unwrap_or(i64::MAX),
        index_query_time: i64::try_from(outcome.elapsed.as_micros()).unwrap_or(i64::MAX),
        count: page.len(),
        logs: page,
        sort_by,
        sort_order,
        query: search_query,
        start_date: start_date.to_rfc3339(),
        end_date: end_date.to_rfc3339(),
        available_columns,
        log_distribution,
    }))
}

/// Handle `DELETE /api/v1/logs` - clear every shard.
pub async fn clear_logs(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .storage
        .clear()
        .map_err(|e| ApiError::Storage(e.to_string()))?;
    state.invalidate_info_cache();

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "All logs cleared successfully",
    })))
}
