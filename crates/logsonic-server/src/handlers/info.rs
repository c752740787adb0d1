//! System and storage summary endpoint.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use logsonic_types::{StorageInfo, SystemInfo, SystemInfoResponse};
use serde::Deserialize;
use sysinfo::System;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query of `GET /info`.
#[derive(Debug, Default, Deserialize)]
pub struct InfoQuery {
    /// `?refresh=true` busts the short-lived cache.
    #[serde(default)]
    refresh: Option<String>,
}

/// Handle `GET /api/v1/info`.
pub async fn system_info(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InfoQuery>,
) -> ApiResult<Json<SystemInfoResponse>> {
    let refresh = query.refresh.as_deref() == Some("true");
    if !refresh {
        if let Some(cached) = state.cached_info() {
            return Ok(Json(cached));
        }
    }

    let info = build_info(&state)?;
    state.cache_info(info.clone());
    Ok(Json(info))
}

fn build_info(state: &AppState) -> ApiResult<SystemInfoResponse> {
    let dates = state
        .storage
        .list()
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    let mut total_log_entries = 0;
    for date in &dates {
        total_log_entries += state
            .storage
            .get_doc_count(date)
            .map_err(|e| ApiError::Storage(e.to_string()))?;
    }

    let source_names = state
        .storage
        .get_source_names()
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    let storage_info = StorageInfo {
        total_indices: dates.len(),
        available_dates: dates,
        total_log_entries,
        storage_directory: state.storage.base_dir().display().to_string(),
        storage_size_bytes: directory_size(state.storage.base_dir()),
        source_names,
    };

    let mut sys = System::new_all();
    sys.refresh_all();
    let process_memory_bytes = sysinfo::get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or(0, sysinfo::Process::memory);

    let system_info = SystemInfo {
        hostname: hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string()),
        os_type: System::name().unwrap_or_default(),
        architecture: std::env::consts::ARCH.to_string(),
        num_cpu: sys.cpus().len(),
        process_memory_bytes,
        total_memory_bytes: sys.total_memory(),
    };

    Ok(SystemInfoResponse {
        status: "success".to_string(),
        storage_info,
        system_info,
    })
}

/// Recursive size of a directory tree in bytes; unreadable entries count
/// as zero.
fn directory_size(path: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(path) else {
        return 0;
    };
    let mut total = 0;
    for entry in entries.flatten() {
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if metadata.is_dir() {
            total += directory_size(&entry.path());
        } else {
            total += metadata.len();
        }
    }
    total
}
