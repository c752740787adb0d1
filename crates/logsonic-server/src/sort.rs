//! Read-path sorting and column extraction.
//!
//! One pass over the hits collects the union of field names and
//! precomputes a typed sort key per hit so the comparison never reparses
//! values. Hits missing the sort field go last regardless of direction.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use logsonic_types::{FieldValue, LogDocument};

enum SortKey {
    Instant(DateTime<Utc>),
    Number(f64),
    Text(String),
    Missing,
}

impl SortKey {
    fn from_value(value: Option<&FieldValue>) -> Self {
        match value {
            Some(FieldValue::Instant(ts)) => Self::Instant(*ts),
            Some(FieldValue::Int(i)) => Self::Number(*i as f64),
            Some(FieldValue::Float(x)) => Self::Number(*x),
            Some(FieldValue::Str(s)) => Self::Text(s.clone()),
            None => Self::Missing,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Instant(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Missing => 3,
        }
    }
}

fn compare(a: &SortKey, b: &SortKey, ascending: bool) -> Ordering {
    // Missing values sort last in either direction.
    match (a, b) {
        (SortKey::Missing, SortKey::Missing) => return Ordering::Equal,
        (SortKey::Missing, _) => return Ordering::Greater,
        (_, SortKey::Missing) => return Ordering::Less,
        _ => {}
    }

    let ordering = match (a, b) {
        (SortKey::Instant(x), SortKey::Instant(y)) => x.cmp(y),
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        _ => a.rank().cmp(&b.rank()),
    };
    if ascending {
        ordering
    } else {
        ordering.reverse()
    }
}

/// Sorts hits in place by `sort_by` and returns the sorted union of field
/// names across all hits.
pub fn sort_documents(docs: &mut Vec<LogDocument>, sort_by: &str, sort_order: &str) -> Vec<String> {
    let ascending = sort_order == "asc";

    let mut columns = BTreeSet::new();
    let mut keys = Vec::with_capacity(docs.len());
    for doc in docs.iter() {
        for key in doc.keys() {
            columns.insert(key.clone());
        }
        keys.push(SortKey::from_value(doc.get(sort_by)));
    }

    let mut indices: Vec<usize> = (0..docs.len()).collect();
    indices.sort_by(|&a, &b| compare(&keys[a], &keys[b], ascending));

    let mut sorted = Vec::with_capacity(docs.len());
    for index in indices {
        sorted.push(std::mem::take(&mut docs[index]));
    }
    *docs = sorted;

    columns.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn doc_with(key: &str, value: FieldValue) -> LogDocument {
        let mut doc = LogDocument::new();
        doc.insert(key.to_string(), value);
        doc
    }

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn sorts_instants_descending_by_default_order() {
        let mut docs = vec![
            doc_with("timestamp", FieldValue::Instant(at(8))),
            doc_with("timestamp", FieldValue::Instant(at(12))),
            doc_with("timestamp", FieldValue::Instant(at(10))),
        ];
        sort_documents(&mut docs, "timestamp", "desc");
        let hours: Vec<u32> = docs
            .iter()
            .map(|d| {
                use chrono::Timelike;
                d["timestamp"].as_instant().unwrap().hour()
            })
            .collect();
        assert_eq!(hours, vec![12, 10, 8]);
    }

    #[test]
    fn sorts_numbers_ascending() {
        let mut docs = vec![
            doc_with("latency", FieldValue::Int(30)),
            doc_with("latency", FieldValue::Float(1.5)),
            doc_with("latency", FieldValue::Int(7)),
        ];
        sort_documents(&mut docs, "latency", "asc");
        assert_eq!(docs[0]["latency"], FieldValue::Float(1.5));
        assert_eq!(docs[2]["latency"], FieldValue::Int(30));
    }

    #[test]
    fn missing_sort_field_goes_last_in_both_directions() {
        for order in ["asc", "desc"] {
            let mut docs = vec![
                doc_with("other", FieldValue::Int(1)),
                doc_with("level", FieldValue::Str("ERROR".to_string())),
            ];
            sort_documents(&mut docs, "level", order);
            assert!(docs[0].contains_key("level"), "order={order}");
        }
    }

    #[test]
    fn returns_sorted_column_union() {
        let mut docs = vec![
            doc_with("zeta", FieldValue::Int(1)),
            doc_with("alpha", FieldValue::Int(2)),
        ];
        docs[0].insert("mid".to_string(), FieldValue::Int(3));
        let columns = sort_documents(&mut docs, "alpha", "asc");
        assert_eq!(columns, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn strings_sort_lexicographically() {
        let mut docs = vec![
            doc_with("level", FieldValue::Str("WARN".to_string())),
            doc_with("level", FieldValue::Str("ERROR".to_string())),
            doc_with("level", FieldValue::Str("INFO".to_string())),
        ];
        sort_documents(&mut docs, "level", "asc");
        assert_eq!(docs[0]["level"].as_str(), Some("ERROR"));
        assert_eq!(docs[2]["level"].as_str(), Some("WARN"));
    }
}
