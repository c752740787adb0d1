//! Parse-or-suggest endpoint.
//!
//! With a `grok_pattern`, parses the lines through an ephemeral tokenizer
//! and returns the documents. Without one, sweeps the catalog and returns
//! the ten best-scoring patterns.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use logsonic_grok::{PatternCatalog, Tokenizer};
use logsonic_types::{
    AutosuggestResult, IngestOptions, ParseRequest, ParseResponse, SuggestResponse,
};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Handle `POST /api/v1/parse`.
pub async fn parse_or_suggest(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ParseRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = body.map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    if request.grok_pattern.is_empty() {
        let results = autosuggest(&state.catalog, &request.logs);
        return Ok(Json(SuggestResponse {
            status: "success".to_string(),
            response_type: "autosuggest".to_string(),
            results,
        })
        .into_response());
    }

    let tokenizer = Tokenizer::new();
    for (name, pattern) in &request.custom_patterns {
        tokenizer
            .add_custom_pattern(name.clone(), pattern.clone())
            .map_err(|e| ApiError::Pattern(e.to_string()))?;
    }
    tokenizer.add_pattern(request.grok_pattern.clone(), 0);
    tokenizer
        .compile()
        .map_err(|e| ApiError::Pattern(e.to_string()))?;

    let outcome = tokenizer
        .parse_logs(&request.logs, &request.session_options)
        .map_err(|e| ApiError::Parse(e.to_string()))?;

    // The caller supplied the lines; echoing the raw copies back is noise.
    let mut logs = outcome.documents;
    for doc in &mut logs {
        doc.remove("_raw");
    }

    Ok(Json(ParseResponse {
        status: "success".to_string(),
        processed: outcome.processed,
        failed: outcome.failed,
        pattern: request.grok_pattern,
        custom_patterns: request.custom_patterns,
        logs,
    })
    .into_response())
}

/// Scores every catalog pattern against the lines and returns the top 10.
///
/// Patterns that fail to compile are skipped silently; the score is the
/// average number of fields extracted per line.
fn autosuggest(catalog: &PatternCatalog, lines: &[String]) -> Vec<AutosuggestResult> {
    let mut results = Vec::new();

    for def in catalog.get_all() {
        if def.pattern.is_empty() {
            continue;
        }

        let tokenizer = Tokenizer::new();
        for (name, pattern) in &def.custom_patterns {
            // Best effort: a broken custom definition only disables itself.
            let _ = tokenizer.add_custom_pattern(name.clone(), pattern.clone());
        }
        tokenizer.add_pattern(def.pattern.clone(), def.priority);
        if tokenizer.compile().is_err() {
            debug!(pattern = %def.name, "autosuggest skipping pattern that failed to compile");
            continue;
        }

        let Ok(outcome) = tokenizer.parse_logs(lines, &IngestOptions::default()) else {
            continue;
        };
        if outcome.processed == 0 || outcome.documents.is_empty() {
            continue;
        }

        let total_fields: usize = outcome.documents.iter().map(|doc| doc.len()).sum();
        #[allow(clippy::cast_precision_loss)]
        let score = total_fields as f64 / outcome.documents.len() as f64;

        results.push(AutosuggestResult {
            pattern_name: def.name,
            pattern_description: def.description,
            pattern: def.pattern,
            score,
            parsed_logs: outcome.documents,
            custom_patterns: def.custom_patterns,
        });
    }

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results.truncate(10);
    results
}
