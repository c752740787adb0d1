//! Request and response envelopes for the HTTP API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::options::IngestOptions;
use crate::value::LogDocument;

/// Standardized error envelope used by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub status: String,
    /// Main error message.
    pub error: String,
    /// Stable code for programmatic handling.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
    /// Additional detail, usually the underlying error's display form.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
}

/// Batch ingest request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestRequest {
    /// Raw log lines.
    #[serde(default)]
    pub logs: Vec<String>,
    /// Session handle returned by `/ingest/start`.
    #[serde(default)]
    pub session_id: String,
}

/// Response for the ingest endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// `"success"` on the happy path.
    pub status: String,
    /// Number of lines parsed successfully.
    #[serde(default)]
    pub processed: usize,
    /// Number of lines that produced failure documents.
    #[serde(default)]
    pub failed: usize,
    /// Session handle, echoed back (or freshly minted by `/ingest/start`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub session_id: String,
}

/// Parse-or-suggest request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParseRequest {
    /// Raw log lines.
    #[serde(default)]
    pub logs: Vec<String>,
    /// When set, parse with this pattern; when empty, autosuggest.
    #[serde(default)]
    pub grok_pattern: String,
    /// Custom placeholder definitions for `grok_pattern`.
    #[serde(default)]
    pub custom_patterns: BTreeMap<String, String>,
    /// Options applied during parsing (timezone overrides, meta, ...).
    #[serde(default, rename = "session_options")]
    pub session_options: IngestOptions,
}

/// Response from `/parse` when a pattern was supplied.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResponse {
    /// `"success"` on the happy path.
    pub status: String,
    /// Number of lines parsed successfully.
    pub processed: usize,
    /// Number of lines that failed to parse.
    pub failed: usize,
    /// The pattern that was used.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pattern: String,
    /// Custom placeholder definitions that were used.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_patterns: BTreeMap<String, String>,
    /// Parsed documents (with `_raw` stripped).
    pub logs: Vec<LogDocument>,
}

/// One pattern's score in an autosuggest sweep.
#[derive(Debug, Clone, Serialize)]
pub struct AutosuggestResult {
    /// Catalog name of the pattern.
    pub pattern_name: String,
    /// Catalog description of the pattern.
    pub pattern_description: String,
    /// The pattern body.
    pub pattern: String,
    /// Average extracted fields per input line.
    pub score: f64,
    /// Documents produced while scoring.
    pub parsed_logs: Vec<LogDocument>,
    /// Custom placeholder definitions the pattern depends on.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_patterns: BTreeMap<String, String>,
}

/// Response from `/parse` when no pattern was supplied.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestResponse {
    /// `"success"` on the happy path.
    pub status: String,
    /// Always `"autosuggest"`.
    #[serde(rename = "type")]
    pub response_type: String,
    /// Top-scoring patterns, best first.
    pub results: Vec<AutosuggestResult>,
}

/// One time bucket in the log distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogDistributionEntry {
    /// Bucket start, RFC 3339.
    pub start_time: String,
    /// Bucket end, RFC 3339.
    pub end_time: String,
    /// Total hits in the bucket.
    pub count: usize,
    /// Hits per source label.
    pub source_counts: BTreeMap<String, usize>,
}

/// Response for `GET /logs`.
#[derive(Debug, Clone, Serialize)]
pub struct LogResponse {
    /// `"success"` on the happy path.
    pub status: String,
    /// Total hits before pagination.
    pub total_count: usize,
    /// Effective offset (reset to 0 when past the end).
    pub offset: usize,
    /// Requested page size.
    pub limit: usize,
    /// Total handler time in microseconds.
    pub time_taken: i64,
    /// Time spent inside the storage search in microseconds.
    pub index_query_time: i64,
    /// Number of hits in this page.
    pub count: usize,
    /// The page of hits.
    pub logs: Vec<LogDocument>,
    /// Field the hits are sorted by.
    pub sort_by: String,
    /// `asc` or `desc`.
    pub sort_order: String,
    /// The search query, echoed.
    pub query: String,
    /// Effective range start, RFC 3339.
    pub start_date: String,
    /// Effective range end, RFC 3339.
    pub end_date: String,
    /// Union of field names across all hits, sorted.
    pub available_columns: Vec<String>,
    /// Time-bucketed hit distribution.
    pub log_distribution: Vec<LogDistributionEntry>,
}

/// Response for the `/grok` catalog endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct GrokPatternResponse {
    /// `"success"` or `"error"`.
    pub status: String,
    /// Catalog entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<crate::pattern::GrokPatternDefinition>,
    /// Message when `status` is `"error"` (or a deletion notice).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

/// Storage half of the `/info` summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageInfo {
    /// Number of day shards on disk.
    pub total_indices: usize,
    /// Dates that have a shard, sorted.
    pub available_dates: Vec<String>,
    /// Sum of document counts across shards.
    pub total_log_entries: u64,
    /// Base directory holding shards and the catalog file.
    pub storage_directory: String,
    /// Total size on disk in bytes.
    pub storage_size_bytes: u64,
    /// Unique `_src` values across all shards.
    pub source_names: Vec<String>,
}

/// System half of the `/info` summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemInfo {
    /// Machine hostname.
    pub hostname: String,
    /// Operating system name.
    pub os_type: String,
    /// CPU architecture.
    pub architecture: String,
    /// Number of logical CPUs.
    pub num_cpu: usize,
    /// Resident memory of this process in bytes.
    pub process_memory_bytes: u64,
    /// Total system memory in bytes.
    pub total_memory_bytes: u64,
}

/// Response for `GET /info`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemInfoResponse {
    /// `"success"` on the happy path.
    pub status: String,
    /// Storage summary.
    pub storage_info: StorageInfo,
    /// Host and process summary.
    pub system_info: SystemInfo,
}
