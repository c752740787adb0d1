//! The process-wide ingest session map.
//!
//! Reads dominate (every `/ingest/logs` call), so the map sits behind a
//! `RwLock`; writes happen on start, end, and expiry sweeps only.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use logsonic_grok::{ParseOutcome, Tokenizer};
use logsonic_types::IngestOptions;
use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{IngestError, Result};

/// Sessions older than this are eligible for garbage collection.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// How often the sweeper wakes up.
const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// An active ingest session.
///
/// The session exclusively owns its tokenizer; both are dropped together
/// when the session ends or expires.
pub struct IngestSession {
    /// Session handle.
    pub id: Uuid,
    /// When the session was started.
    pub created_at: DateTime<Utc>,
    /// The options supplied at start.
    pub options: IngestOptions,
    /// The session's private tokenizer, compiled at start.
    pub tokenizer: Tokenizer,
}

/// Process-wide registry of active ingest sessions.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<IngestSession>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new session and returns its id.
    ///
    /// Validates that a pattern name or body was supplied, registers the
    /// custom placeholder definitions, adds the main pattern, and forces
    /// an initial compile so the first ingest call pays no compile cost.
    ///
    /// # Errors
    ///
    /// [`IngestError::MissingPattern`] when neither `name` nor `pattern`
    /// is set; [`IngestError::CustomPattern`] / [`IngestError::Pattern`]
    /// on compilation failures.
    pub fn start(&self, options: IngestOptions) -> Result<Uuid> {
        if options.name.is_empty() && options.pattern.is_empty() {
            return Err(IngestError::MissingPattern);
        }

        let tokenizer = Tokenizer::new();
        for (name, body) in &options.custom_patterns {
            tokenizer
                .add_custom_pattern(name.clone(), body.clone())
                .map_err(IngestError::CustomPattern)?;
        }
        tokenizer.add_pattern(options.pattern.clone(), options.priority);
        tokenizer.compile().map_err(IngestError::Pattern)?;

        let id = Uuid::new_v4();
        let session = Arc::new(IngestSession {
            id,
            created_at: Utc::now(),
            options,
            tokenizer,
        });
        self.sessions.write().insert(id, session);
        info!(session_id = %id, "ingest session started");
        Ok(id)
    }

    /// Parses a batch of lines through the session's tokenizer.
    ///
    /// The caller is responsible for storing the resulting documents.
    ///
    /// # Errors
    ///
    /// [`IngestError::InvalidSession`] for an empty or unknown id;
    /// [`IngestError::Parse`] when the tokenizer has no usable matcher.
    pub fn ingest(&self, session_id: &str, lines: &[String]) -> Result<(ParseOutcome, IngestOptions)> {
        let session = self.lookup(session_id)?;
        let outcome = session
            .tokenizer
            .parse_logs(lines, &session.options)
            .map_err(IngestError::Parse)?;
        Ok((outcome, session.options.clone()))
    }

    /// Ends a session. Unknown or empty ids are a no-op success.
    pub fn end(&self, session_id: &str) {
        if let Ok(id) = Uuid::parse_str(session_id) {
            if self.sessions.write().remove(&id).is_some() {
                info!(session_id = %id, "ingest session ended");
            }
        }
    }

    /// Looks up a session by its string id.
    fn lookup(&self, session_id: &str) -> Result<Arc<IngestSession>> {
        if session_id.is_empty() {
            return Err(IngestError::InvalidSession);
        }
        let id = Uuid::parse_str(session_id).map_err(|_| IngestError::InvalidSession)?;
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or(IngestError::InvalidSession)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns true when no sessions are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Removes sessions older than `timeout`. Returns how many were
    /// removed.
    pub fn expire_older_than(&self, timeout: Duration, now: DateTime<Utc>) -> usize {
        let cutoff = now
            - chrono::Duration::from_std(timeout).unwrap_or_else(|_| chrono::Duration::hours(1));
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| session.created_at >= cutoff);
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed, "expired ingest sessions");
        }
        removed
    }
}

/// Periodically removes sessions older than [`SESSION_TIMEOUT`].
///
/// Runs until the process exits; spawn it once at startup.
pub async fn run_expiry_sweeper(registry: Arc<SessionRegistry>) {
    let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        registry.expire_older_than(SESSION_TIMEOUT, Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syslog_options() -> IngestOptions {
        IngestOptions {
            name: "Syslog".to_string(),
            pattern: r"%{SYSLOGTIMESTAMP:timestamp} %{HOSTNAME:hostname} %{GREEDYDATA:message}"
                .to_string(),
            priority: 1,
            source: "host1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn start_requires_name_or_pattern() {
        let registry = SessionRegistry::new();
        let result = registry.start(IngestOptions::default());
        assert!(matches!(result, Err(IngestError::MissingPattern)));
    }

    #[test]
    fn start_ingest_end_lifecycle() {
        let registry = SessionRegistry::new();
        let id = registry.start(syslog_options()).unwrap();
        assert_eq!(registry.len(), 1);

        let lines = vec!["Jan 23 14:05:01 myhost something happened".to_string()];
        let (outcome, options) = registry.ingest(&id.to_string(), &lines).unwrap();
        assert_eq!(outcome.processed, 1);
        assert_eq!(outcome.failed, 0);
        assert_eq!(options.source, "host1");
        assert_eq!(
            outcome.documents[0]["hostname"].as_str(),
            Some("myhost")
        );

        registry.end(&id.to_string());
        assert!(registry.is_empty());
    }

    #[test]
    fn ingest_with_unknown_session_fails() {
        let registry = SessionRegistry::new();
        let result = registry.ingest(&Uuid::new_v4().to_string(), &[]);
        assert!(matches!(result, Err(IngestError::InvalidSession)));
    }

    #[test]
    fn ingest_with_empty_session_id_fails() {
        let registry = SessionRegistry::new();
        let result = registry.ingest("", &[]);
        assert!(matches!(result, Err(IngestError::InvalidSession)));
    }

    #[test]
    fn double_end_is_a_no_op() {
        let registry = SessionRegistry::new();
        let id = registry.start(syslog_options()).unwrap();
        registry.end(&id.to_string());
        registry.end(&id.to_string());
        assert!(registry.is_empty());
    }

    #[test]
    fn start_rejects_invalid_custom_pattern() {
        let registry = SessionRegistry::new();
        let mut options = syslog_options();
        options
            .custom_patterns
            .insert("BROKEN".to_string(), "([unclosed".to_string());
        let result = registry.start(options);
        assert!(matches!(result, Err(IngestError::CustomPattern(_))));
    }

    #[test]
    fn start_rejects_uncompilable_pattern() {
        let registry = SessionRegistry::new();
        let mut options = syslog_options();
        options.pattern = "%{NO_SUCH_PLACEHOLDER:x}".to_string();
        let result = registry.start(options);
        assert!(matches!(result, Err(IngestError::Pattern(_))));
    }

    #[test]
    fn sessions_are_isolated_between_each_other() {
        let registry = SessionRegistry::new();
        let id_a = registry.start(syslog_options()).unwrap();

        let mut other = syslog_options();
        other.pattern = r"ERROR %{GREEDYDATA:message}".to_string();
        other.source = "host2".to_string();
        let id_b = registry.start(other).unwrap();

        let lines = vec!["ERROR boom".to_string()];
        let (outcome_a, _) = registry.ingest(&id_a.to_string(), &lines).unwrap();
        let (outcome_b, _) = registry.ingest(&id_b.to_string(), &lines).unwrap();

        // Session A's syslog pattern does not match; session B's does.
        assert_eq!(outcome_a.failed, 1);
        assert_eq!(outcome_b.processed, 1);
    }

    #[test]
    fn expiry_removes_only_old_sessions() {
        let registry = SessionRegistry::new();
        let id = registry.start(syslog_options()).unwrap();

        // Nothing is older than the timeout yet.
        assert_eq!(registry.expire_older_than(SESSION_TIMEOUT, Utc::now()), 0);
        assert_eq!(registry.len(), 1);

        // Pretend two hours passed.
        let later = Utc::now() + chrono::Duration::hours(2);
        assert_eq!(registry.expire_older_than(SESSION_TIMEOUT, later), 1);
        assert!(registry.is_empty());

        let result = registry.ingest(&id.to_string(), &[]);
        assert!(matches!(result, Err(IngestError::InvalidSession)));
    }

    #[test]
    fn empty_batch_parses_to_zero_counts() {
        let registry = SessionRegistry::new();
        let id = registry.start(syslog_options()).unwrap();
        let (outcome, _) = registry.ingest(&id.to_string(), &[]).unwrap();
        assert_eq!(outcome.processed, 0);
        assert_eq!(outcome.failed, 0);
        assert!(outcome.documents.is_empty());
    }
}
