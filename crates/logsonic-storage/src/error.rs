//! Error types for the storage engine.

use thiserror::Error;

/// Errors that can occur in the storage engine.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error touching the base directory or a shard.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A tantivy index operation failed.
    #[error("index error: {0}")]
    Index(#[from] tantivy::TantivyError),

    /// The search query string could not be parsed.
    #[error("failed to parse query '{query}': {reason}")]
    QueryParse {
        /// The offending query string.
        query: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A document could not be converted to the shard schema.
    #[error("failed to encode document: {0}")]
    DocumentEncoding(String),

    /// A stored document is missing its `timestamp` field.
    #[error("document has no timestamp")]
    MissingTimestamp,

    /// A search task panicked or was cancelled.
    #[error("search task failed: {0}")]
    TaskFailed(String),
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
