//! Time-bucketed hit distribution.
//!
//! Buckets the hit list into at most 100 intervals of at least one
//! second. Hits without a valid `timestamp` are not placed in buckets.

use std::collections::BTreeMap;

use chrono::Duration;
use logsonic_types::{FieldValue, LogDistributionEntry, LogDocument};

/// Maximum number of buckets.
const MAX_BUCKETS: i64 = 100;

/// Computes the log distribution for a hit list.
///
/// Returns an empty vector when no hit carries a valid timestamp. The
/// final bucket closes inclusively at the latest timestamp, so a hit at
/// exactly that instant lands in bucket `n - 1`.
#[must_use]
pub fn calculate_distribution(docs: &[LogDocument]) -> Vec<LogDistributionEntry> {
    let mut first = None;
    let mut last = None;
    for doc in docs {
        let Some(ts) = doc.get("timestamp").and_then(FieldValue::as_instant) else {
            continue;
        };
        first = Some(first.map_or(ts, |current: chrono::DateTime<chrono::Utc>| current.min(ts)));
        last = Some(last.map_or(ts, |current: chrono::DateTime<chrono::Utc>| current.max(ts)));
    }
    let (Some(first), Some(last)) = (first, last) else {
        return Vec::new();
    };

    let span = last - first;
    let min_bucket = Duration::seconds(1);

    let mut bucket = span / 100;
    if bucket < min_bucket {
        bucket = min_bucket;
    }

    let num_buckets = div_duration(span, bucket).clamp(1, MAX_BUCKETS);

    // Recompute for even distribution, but never below the minimum width.
    bucket = span / i32::try_from(num_buckets).unwrap_or(1);
    if bucket < min_bucket {
        bucket = min_bucket;
    }

    let mut entries = Vec::with_capacity(usize::try_from(num_buckets).unwrap_or(1));
    for i in 0..num_buckets {
        let start = first + bucket * i32::try_from(i).unwrap_or(0);
        let end = start + bucket;
        entries.push(LogDistributionEntry {
            start_time: start.to_rfc3339(),
            end_time: end.to_rfc3339(),
            count: 0,
            source_counts: BTreeMap::new(),
        });
    }

    let last_index = entries.len() - 1;
    for doc in docs {
        let Some(ts) = doc.get("timestamp").and_then(FieldValue::as_instant) else {
            continue;
        };
        if ts < first || ts > last {
            continue;
        }

        let index = if ts == last {
            last_index
        } else {
            usize::try_from(div_duration(ts - first, bucket))
                .unwrap_or(last_index)
                .min(last_index)
        };

        let source = doc
            .get("_src")
            .map_or_else(|| "unknown".to_string(), ToString::to_string);
        let entry = &mut entries[index];
        entry.count += 1;
        *entry.source_counts.entry(source).or_default() += 1;
    }

    entries
}

/// Integer division of two durations at microsecond precision.
fn div_duration(span: Duration, bucket: Duration) -> i64 {
    let bucket_us = bucket.num_microseconds().unwrap_or(1).max(1);
    span.num_microseconds().unwrap_or(0) / bucket_us
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn doc_at(ts: DateTime<Utc>, src: &str) -> LogDocument {
        let mut doc = LogDocument::new();
        doc.insert("timestamp".to_string(), FieldValue::Instant(ts));
        doc.insert("_src".to_string(), FieldValue::Str(src.to_string()));
        doc
    }

    fn at(seconds: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::seconds(i64::from(seconds))
    }

    #[test]
    fn empty_input_has_empty_distribution() {
        assert!(calculate_distribution(&[]).is_empty());
    }

    #[test]
    fn hits_without_timestamps_produce_no_buckets() {
        let mut doc = LogDocument::new();
        doc.insert("_raw".to_string(), FieldValue::Str("x".to_string()));
        assert!(calculate_distribution(&[doc]).is_empty());
    }

    #[test]
    fn single_timestamp_gets_one_second_bucket() {
        let entries = calculate_distribution(&[doc_at(at(0), "a")]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].count, 1);

        let start = DateTime::parse_from_rfc3339(&entries[0].start_time).unwrap();
        let end = DateTime::parse_from_rfc3339(&entries[0].end_time).unwrap();
        assert_eq!(end - start, Duration::seconds(1));
    }

    #[test]
    fn hit_at_the_last_instant_lands_in_the_final_bucket() {
        let docs: Vec<LogDocument> = (0..=200).map(|s| doc_at(at(s), "a")).collect();
        let entries = calculate_distribution(&docs);
        assert_eq!(entries.len(), 100);
        assert!(entries.last().unwrap().count >= 1);

        let total: usize = entries.iter().map(|e| e.count).sum();
        assert_eq!(total, docs.len());
    }

    #[test]
    fn short_spans_use_second_wide_buckets() {
        // 10 seconds of data cannot produce 100 buckets.
        let docs: Vec<LogDocument> = (0..=10).map(|s| doc_at(at(s), "a")).collect();
        let entries = calculate_distribution(&docs);
        assert_eq!(entries.len(), 10);
    }

    #[test]
    fn source_counts_break_down_per_bucket() {
        let docs = vec![doc_at(at(0), "alpha"), doc_at(at(0), "beta"), doc_at(at(0), "alpha")];
        let entries = calculate_distribution(&docs);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source_counts["alpha"], 2);
        assert_eq!(entries[0].source_counts["beta"], 1);
    }

    #[test]
    fn hits_without_source_count_as_unknown() {
        let mut doc = LogDocument::new();
        doc.insert("timestamp".to_string(), FieldValue::Instant(at(0)));
        let entries = calculate_distribution(&[doc]);
        assert_eq!(entries[0].source_counts["unknown"], 1);
    }
}
