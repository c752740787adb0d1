//! Per-session ingest options.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Options supplied when starting an ingest session.
///
/// Either `name` or `pattern` must be set. `meta` fields are merged into
/// every document produced by the session (for example CloudWatch imports
/// attach `aws_region`, `log_group`, `log_stream`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Display name of the pattern being used.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Priority assigned to `pattern`.
    #[serde(default, skip_serializing_if = "priority_is_default")]
    pub priority: i32,
    /// Custom placeholder definitions registered before `pattern`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_patterns: BTreeMap<String, String>,
    /// The Grok pattern used to parse this session's lines.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pattern: String,
    /// Source label recorded as `_src` on every document.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    /// Run the smart decoder over each raw line.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub smart_decoder: bool,
    /// IANA zone name used to reinterpret naive timestamps.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub force_timezone: String,
    /// Replaces the parsed year when set to a valid integer.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub force_start_year: String,
    /// Replaces the parsed month (1-12) when set.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub force_start_month: String,
    /// Replaces the parsed day (1-31) when set.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub force_start_day: String,
    /// Additional fields merged into every document.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, serde_json::Value>,
}

fn priority_is_default(priority: &i32) -> bool {
    *priority == 0
}
