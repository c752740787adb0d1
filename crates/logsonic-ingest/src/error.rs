//! Error types for the ingest session machine.

use thiserror::Error;

/// Errors that can occur while managing or using ingest sessions.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Neither a pattern name nor a pattern body was supplied.
    #[error("pattern name or pattern is required")]
    MissingPattern,

    /// The supplied session id is unknown, expired, or empty.
    #[error("invalid or missing session id")]
    InvalidSession,

    /// A custom placeholder definition failed validation.
    #[error("failed to add custom pattern: {0}")]
    CustomPattern(#[source] logsonic_grok::GrokError),

    /// The session's main pattern failed to compile.
    #[error("failed to compile session pattern: {0}")]
    Pattern(#[source] logsonic_grok::GrokError),

    /// Parsing failed wholesale (no usable matcher).
    #[error("failed to parse logs: {0}")]
    Parse(#[source] logsonic_grok::GrokError),
}

/// Result type alias for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
