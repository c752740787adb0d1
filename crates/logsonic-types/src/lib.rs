//! # logsonic-types
//!
//! Shared type definitions used across the LogSonic crates.
//!
//! This crate provides:
//!
//! - [`FieldValue`] / [`LogDocument`] — Typed dynamic log records
//! - [`GrokPatternDefinition`] — Named, prioritized Grok patterns
//! - [`IngestOptions`] — Per-session ingest configuration
//! - Request and response envelopes for the HTTP API

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod options;
pub mod pattern;
pub mod value;

pub use api::{
    AutosuggestResult, ErrorResponse, GrokPatternResponse, IngestRequest, IngestResponse,
    LogDistributionEntry, LogResponse, ParseRequest, ParseResponse, StorageInfo, SuggestResponse,
    SystemInfo, SystemInfoResponse,
};
pub use options::IngestOptions;
pub use pattern::{GrokPatternDefinition, PatternType};
pub use value::{coerce_scalar, FieldValue, LogDocument};
