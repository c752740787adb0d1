//! Priority-ordered multi-pattern log line parsing.
//!
//! A [`Tokenizer`] owns a table of Grok patterns plus custom placeholder
//! definitions and lazily compiles them into matchers. Compiled state is
//! invalidated by any mutation and rebuilt on the next parse; the internal
//! lock serializes the compile transition so concurrent callers never see a
//! half-built matcher set.

use chrono::Utc;
use grok::Grok;
use logsonic_types::{FieldValue, IngestOptions, LogDocument};
use parking_lot::Mutex;
use tracing::warn;

use crate::decoder::smart_decode;
use crate::error::{GrokError, Result};
use crate::timestamp::normalize_timestamp;

/// Message recorded on documents for lines no pattern matched.
const NO_MATCH_ERROR: &str = "no grok pattern matches the log line";

/// Result of a [`Tokenizer::parse_logs`] call.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    /// One document per input line, in input order.
    pub documents: Vec<LogDocument>,
    /// Lines that matched a pattern.
    pub processed: usize,
    /// Lines that produced failure documents.
    pub failed: usize,
}

#[derive(Debug, Clone)]
struct PatternEntry {
    body: String,
    priority: i32,
}

#[derive(Default)]
struct TokenizerState {
    patterns: Vec<PatternEntry>,
    custom_patterns: Vec<(String, String)>,
    compiled: Option<Vec<grok::Pattern>>,
}

/// A log line tokenizer with an isolated pattern table.
///
/// Instances are owned by one ingest session (or constructed per request
/// for `/parse`) and must not be shared across sessions.
pub struct Tokenizer {
    state: Mutex<TokenizerState>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Creates an empty tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TokenizerState::default()),
        }
    }

    /// Appends a pattern to the table and invalidates the compiled cache.
    ///
    /// Insertion order is preserved and breaks priority ties.
    pub fn add_pattern(&self, body: impl Into<String>, priority: i32) {
        let mut state = self.state.lock();
        state.patterns.push(PatternEntry {
            body: body.into(),
            priority,
        });
        state.compiled = None;
    }

    /// Registers a custom placeholder definition.
    ///
    /// # Errors
    ///
    /// Returns [`GrokError::InvalidPattern`] when the definition does not
    /// compile in isolation; the table is left unchanged in that case.
    pub fn add_custom_pattern(&self, name: impl Into<String>, body: impl Into<String>) -> Result<()> {
        let name = name.into();
        let body = body.into();

        // Validate against a scratch instance before recording.
        let mut scratch = Grok::default();
        scratch.add_pattern(name.clone(), body.clone());
        scratch
            .compile(&format!("%{{{name}}}"), false)
            .map_err(|e| GrokError::InvalidPattern {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        let mut state = self.state.lock();
        state.custom_patterns.retain(|(existing, _)| *existing != name);
        state.custom_patterns.push((name, body));
        state.compiled = None;
        Ok(())
    }

    /// Wipes patterns, custom definitions, and the compiled cache.
    pub fn clear_patterns(&self) {
        let mut state = self.state.lock();
        state.patterns.clear();
        state.custom_patterns.clear();
        state.compiled = None;
    }

    /// Returns the pattern bodies currently in the table, insertion order.
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        self.state
            .lock()
            .patterns
            .iter()
            .map(|entry| entry.body.clone())
            .collect()
    }

    /// Compiles the pattern table if it is stale.
    ///
    /// # Errors
    ///
    /// Returns [`GrokError::NoPatterns`] when the table is empty or no
    /// pattern compiles. Individual compile failures are skipped with a
    /// warning so one bad pattern does not disable the rest.
    pub fn compile(&self) -> Result<()> {
        let mut state = self.state.lock();
        Self::compile_locked(&mut state)
    }

    fn compile_locked(state: &mut TokenizerState) -> Result<()> {
        if state.compiled.is_some() {
            return Ok(());
        }
        if state.patterns.is_empty() {
            return Err(GrokError::NoPatterns);
        }

        let mut grok = Grok::default();
        for (name, body) in &state.custom_patterns {
            grok.add_pattern(name.clone(), body.clone());
        }

        // Descending priority; sort is stable so ties keep insertion order.
        let mut ordered: Vec<&PatternEntry> = state.patterns.iter().collect();
        ordered.sort_by_key(|entry| std::cmp::Reverse(entry.priority));

        let mut compiled = Vec::with_capacity(ordered.len());
        for entry in ordered {
            match grok.compile(&entry.body, true) {
                Ok(pattern) => compiled.push(pattern),
                Err(e) => {
                    warn!(pattern = %entry.body, error = %e, "skipping pattern that failed to compile");
                }
            }
        }

        if compiled.is_empty() {
            return Err(GrokError::NoPatterns);
        }

        state.compiled = Some(compiled);
        Ok(())
    }

    /// Parses log lines into documents.
    ///
    /// Every line yields exactly one document: a structured record when a
    /// pattern matches, a failure record otherwise. With an empty pattern
    /// table, all lines yield failure records and the call still succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`GrokError::NoPatterns`] only when patterns exist but none
    /// of them compile.
    pub fn parse_logs(&self, lines: &[String], options: &IngestOptions) -> Result<ParseOutcome> {
        let mut state = self.state.lock();

        if state.patterns.is_empty() {
            let now = Utc::now();
            let documents = lines
                .iter()
                .map(|line| failure_document(line, options, now))
                .collect::<Vec<_>>();
            return Ok(ParseOutcome {
                failed: documents.len(),
                documents,
                processed: 0,
            });
        }

        Self::compile_locked(&mut state)?;
        let Some(compiled) = state.compiled.as_ref() else {
            return Err(GrokError::NoPatterns);
        };

        let mut outcome = ParseOutcome::default();
        for line in lines {
            match parse_line(compiled, line, options) {
                Some(doc) => {
                    outcome.documents.push(doc);
                    outcome.processed += 1;
                }
                None => {
                    outcome
                        .documents
                        .push(failure_document(line, options, Utc::now()));
                    outcome.failed += 1;
                }
            }
        }

        Ok(outcome)
    }
}

/// Tries each compiled pattern in priority order; the first non-empty
/// capture set wins.
fn parse_line(
    compiled: &[grok::Pattern],
    line: &str,
    options: &IngestOptions,
) -> Option<LogDocument> {
    for pattern in compiled {
        let Some(matches) = pattern.match_against(line) else {
            continue;
        };

        let mut doc = LogDocument::new();
        let mut raw_timestamp = None;
        for (name, value) in matches.iter() {
            if value.is_empty() {
                continue;
            }
            if name == "timestamp" {
                raw_timestamp = Some(value.to_string());
            }
            doc.insert(name.to_string(), FieldValue::Str(value.to_string()));
        }
        if doc.is_empty() {
            continue;
        }

        doc.insert("_raw".to_string(), FieldValue::Str(line.to_string()));
        doc.insert(
            "_src".to_string(),
            FieldValue::Str(options.source.clone()),
        );

        // Meta fills gaps; it never overrides captures.
        for (key, value) in &options.meta {
            if !doc.contains_key(key) || key == "_raw" || key == "_src" {
                doc.insert(key.clone(), FieldValue::from_json(value));
            }
        }

        let now = Utc::now();
        let ts = raw_timestamp
            .map_or(now, |raw| normalize_timestamp(&raw, options, now));
        doc.insert("timestamp".to_string(), FieldValue::Instant(ts));

        if options.smart_decoder {
            for (key, value) in smart_decode(line) {
                doc.insert(key.to_string(), FieldValue::Str(value));
            }
        }

        return Some(doc);
    }
    None
}

fn failure_document(
    line: &str,
    options: &IngestOptions,
    now: chrono::DateTime<Utc>,
) -> LogDocument {
    let mut doc = LogDocument::new();
    doc.insert(
        "error".to_string(),
        FieldValue::Str(NO_MATCH_ERROR.to_string()),
    );
    doc.insert("_raw".to_string(), FieldValue::Str(line.to_string()));
    doc.insert("timestamp".to_string(), FieldValue::Instant(now));
    for (key, value) in &options.meta {
        if !doc.contains_key(key) {
            doc.insert(key.clone(), FieldValue::from_json(value));
        }
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parse_with_no_patterns_yields_failure_documents() {
        let tokenizer = Tokenizer::new();
        let outcome = tokenizer
            .parse_logs(&lines(&["one", "two"]), &IngestOptions::default())
            .unwrap();

        assert_eq!(outcome.processed, 0);
        assert_eq!(outcome.failed, 2);
        assert_eq!(outcome.documents.len(), 2);
        for doc in &outcome.documents {
            assert!(doc.contains_key("error"));
            assert!(doc.contains_key("_raw"));
            assert!(doc["timestamp"].as_instant().is_some());
        }
    }

    #[test]
    fn parses_syslog_line_with_captures() {
        let tokenizer = Tokenizer::new();
        tokenizer.add_pattern(
            r"%{SYSLOGTIMESTAMP:timestamp} %{HOSTNAME:hostname} %{PROG:program}(?:\[%{POSINT:pid}\])?: %{GREEDYDATA:message}",
            1,
        );

        let options = IngestOptions {
            source: "host1".to_string(),
            ..Default::default()
        };
        let outcome = tokenizer
            .parse_logs(
                &lines(&["Jan 23 14:05:01 myhost sshd[12345]: Failed password for root"]),
                &options,
            )
            .unwrap();

        assert_eq!(outcome.processed, 1);
        assert_eq!(outcome.failed, 0);
        let doc = &outcome.documents[0];
        assert_eq!(doc["hostname"].as_str(), Some("myhost"));
        assert_eq!(doc["program"].as_str(), Some("sshd"));
        assert_eq!(doc["pid"].as_str(), Some("12345"));
        assert_eq!(doc["_src"].as_str(), Some("host1"));
        assert!(doc["timestamp"].as_instant().is_some());
    }

    #[test]
    fn higher_priority_pattern_wins() {
        let tokenizer = Tokenizer::new();
        tokenizer.add_pattern(r"ERROR %{GREEDYDATA:error_message}", 1);
        tokenizer.add_pattern(r"%{GREEDYDATA:anything}", 10);

        let outcome = tokenizer
            .parse_logs(&lines(&["ERROR boom"]), &IngestOptions::default())
            .unwrap();

        let doc = &outcome.documents[0];
        assert_eq!(doc["anything"].as_str(), Some("ERROR boom"));
        assert!(!doc.contains_key("error_message"));
    }

    #[test]
    fn equal_priority_keeps_insertion_order() {
        let tokenizer = Tokenizer::new();
        tokenizer.add_pattern(r"%{WORD:first} %{GREEDYDATA:rest_a}", 5);
        tokenizer.add_pattern(r"%{WORD:word} %{GREEDYDATA:rest_b}", 5);

        let outcome = tokenizer
            .parse_logs(&lines(&["hello world"]), &IngestOptions::default())
            .unwrap();

        assert!(outcome.documents[0].contains_key("rest_a"));
    }

    #[test]
    fn mixed_matches_count_processed_and_failed() {
        let tokenizer = Tokenizer::new();
        tokenizer.add_pattern(r"ERROR %{GREEDYDATA:message}", 1);

        let outcome = tokenizer
            .parse_logs(
                &lines(&["ERROR one", "plain line", "ERROR two"]),
                &IngestOptions::default(),
            )
            .unwrap();

        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.failed, 1);
        assert!(outcome.documents[1].contains_key("error"));
    }

    #[test]
    fn smart_decoder_adds_entity_fields() {
        let tokenizer = Tokenizer::new();
        tokenizer.add_pattern(r"%{GREEDYDATA:message}", 1);

        let options = IngestOptions {
            smart_decoder: true,
            ..Default::default()
        };
        let outcome = tokenizer
            .parse_logs(&lines(&["user bob@x.com from 10.0.0.1"]), &options)
            .unwrap();

        let doc = &outcome.documents[0];
        assert_eq!(doc["_email_addr"].as_str(), Some("bob@x.com"));
        assert_eq!(doc["_ipv4_addr"].as_str(), Some("10.0.0.1"));
    }

    #[test]
    fn meta_fields_fill_but_do_not_override_captures() {
        let tokenizer = Tokenizer::new();
        tokenizer.add_pattern(r"%{WORD:level} %{GREEDYDATA:message}", 1);

        let mut options = IngestOptions::default();
        options
            .meta
            .insert("level".to_string(), serde_json::json!("from-meta"));
        options
            .meta
            .insert("log_group".to_string(), serde_json::json!("my-group"));

        let outcome = tokenizer
            .parse_logs(&lines(&["INFO started"]), &options)
            .unwrap();

        let doc = &outcome.documents[0];
        assert_eq!(doc["level"].as_str(), Some("INFO"));
        assert_eq!(doc["log_group"].as_str(), Some("my-group"));
    }

    #[test]
    fn meta_fields_are_present_on_failure_documents() {
        let tokenizer = Tokenizer::new();
        let mut options = IngestOptions::default();
        options
            .meta
            .insert("log_stream".to_string(), serde_json::json!("stream-1"));

        let outcome = tokenizer.parse_logs(&lines(&["x"]), &options).unwrap();
        assert_eq!(
            outcome.documents[0]["log_stream"].as_str(),
            Some("stream-1")
        );
    }

    #[test]
    fn custom_pattern_is_usable_from_main_pattern() {
        let tokenizer = Tokenizer::new();
        tokenizer
            .add_custom_pattern("TICKET", r"[A-Z]{2,5}-\d+")
            .unwrap();
        tokenizer.add_pattern(r"%{TICKET:ticket} %{GREEDYDATA:message}", 1);

        let outcome = tokenizer
            .parse_logs(&lines(&["OPS-1234 deploy finished"]), &IngestOptions::default())
            .unwrap();

        assert_eq!(outcome.documents[0]["ticket"].as_str(), Some("OPS-1234"));
    }

    #[test]
    fn invalid_custom_pattern_is_rejected() {
        let tokenizer = Tokenizer::new();
        let result = tokenizer.add_custom_pattern("BAD", r"([unclosed");
        assert!(matches!(result, Err(GrokError::InvalidPattern { .. })));
    }

    #[test]
    fn compile_fails_when_nothing_compiles() {
        let tokenizer = Tokenizer::new();
        tokenizer.add_pattern(r"%{DOES_NOT_EXIST:x}", 1);
        assert!(matches!(tokenizer.compile(), Err(GrokError::NoPatterns)));
    }

    #[test]
    fn clear_patterns_resets_state() {
        let tokenizer = Tokenizer::new();
        tokenizer.add_pattern(r"%{GREEDYDATA:message}", 1);
        tokenizer.clear_patterns();
        assert!(tokenizer.patterns().is_empty());

        let outcome = tokenizer
            .parse_logs(&lines(&["anything"]), &IngestOptions::default())
            .unwrap();
        assert_eq!(outcome.failed, 1);
    }

    #[test]
    fn timestamp_capture_becomes_instant() {
        let tokenizer = Tokenizer::new();
        tokenizer.add_pattern(r"%{TIMESTAMP_ISO8601:timestamp} %{GREEDYDATA:message}", 1);

        let outcome = tokenizer
            .parse_logs(
                &lines(&["2023-01-23T14:05:01Z all systems go"]),
                &IngestOptions::default(),
            )
            .unwrap();

        let ts = outcome.documents[0]["timestamp"].as_instant().unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-01-23T14:05:01+00:00");
    }
}
