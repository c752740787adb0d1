//! Error types for pattern management and tokenization.

use thiserror::Error;

/// Errors that can occur in the catalog or tokenizer.
#[derive(Debug, Error)]
pub enum GrokError {
    /// A custom placeholder definition failed to compile.
    #[error("invalid pattern definition '{name}': {reason}")]
    InvalidPattern {
        /// The placeholder name being registered.
        name: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// No pattern in the table could be compiled.
    #[error("no patterns available for parsing")]
    NoPatterns,

    /// A catalog entry with this name already exists.
    #[error("pattern name '{0}' already exists")]
    Conflict(String),

    /// No catalog entry with this name.
    #[error("pattern '{0}' not found")]
    NotFound(String),

    /// The catalog file exists but could not be parsed.
    #[error("malformed catalog file {path}: {source}")]
    MalformedCatalog {
        /// Path of the offending file.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Serialization of the catalog failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred reading or writing the catalog file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for grok operations.
pub type Result<T> = std::result::Result<T, GrokError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = GrokError::NoPatterns;
        assert_eq!(err.to_string(), "no patterns available for parsing");

        let err = GrokError::Conflict("Syslog".to_string());
        assert_eq!(err.to_string(), "pattern name 'Syslog' already exists");

        let err = GrokError::NotFound("Nope".to_string());
        assert_eq!(err.to_string(), "pattern 'Nope' not found");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GrokError>();
    }
}
