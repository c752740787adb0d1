//! One day-scoped tantivy index.
//!
//! Schema, fixed at creation:
//!
//! - `_id` — raw-tokenized, stored; the `{unix_nanos}-{source}-{i}` handle
//! - `timestamp` — date, stored, not indexed (range filtering is in-process)
//! - `_raw` — analyzed text, stored, part of the default search fields
//! - `_src` — raw-tokenized, stored; drives source filtering
//! - `fields` — JSON object carrying every other key with typed values

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use logsonic_types::{coerce_scalar, FieldValue, LogDocument};
use parking_lot::Mutex;
use percent_encoding::percent_decode_str;
use tantivy::collector::TopDocs;
use tantivy::query::{AllQuery, BooleanQuery, Query, QueryParser, TermQuery};
use tantivy::schema::{
    Field, IndexRecordOption, NamedFieldDocument, Schema, STORED, STRING, TEXT,
};
use tantivy::{Document, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};

use crate::error::{Result, StorageError};

/// Per-shard hit cap; protective, not a business limit.
const MAX_HITS_PER_SHARD: usize = 1_000_000;

/// Writer heap per shard.
const WRITER_MEMORY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Copy)]
struct ShardFields {
    id: Field,
    timestamp: Field,
    raw: Field,
    src: Field,
    dynamic: Field,
}

/// A single day's index.
pub struct Shard {
    index: Index,
    reader: IndexReader,
    writer: Mutex<IndexWriter>,
    fields: ShardFields,
}

fn build_schema() -> (Schema, ShardFields) {
    let mut builder = Schema::builder();
    let id = builder.add_text_field("_id", STRING | STORED);
    let timestamp = builder.add_date_field("timestamp", STORED);
    let raw = builder.add_text_field("_raw", TEXT | STORED);
    let src = builder.add_text_field("_src", STRING | STORED);
    let dynamic = builder.add_json_field("fields", TEXT | STORED);
    (
        builder.build(),
        ShardFields {
            id,
            timestamp,
            raw,
            src,
            dynamic,
        },
    )
}

fn resolve_fields(schema: &Schema) -> Result<ShardFields> {
    Ok(ShardFields {
        id: schema.get_field("_id")?,
        timestamp: schema.get_field("timestamp")?,
        raw: schema.get_field("_raw")?,
        src: schema.get_field("_src")?,
        dynamic: schema.get_field("fields")?,
    })
}

impl Shard {
    /// Creates a new shard directory with the fixed schema.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or index cannot be created.
    pub fn create(path: &Path) -> Result<Self> {
        fs::create_dir_all(path)?;
        let (schema, fields) = build_schema();
        let index = Index::create_in_dir(path, schema)?;
        Self::with_index(index, fields)
    }

    /// Opens an existing shard directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the index cannot be opened or its schema does
    /// not carry the expected fields.
    pub fn open(path: &Path) -> Result<Self> {
        let index = Index::open_in_dir(path)?;
        let fields = resolve_fields(&index.schema())?;
        Self::with_index(index, fields)
    }

    /// Opens the shard at `path`, creating it when absent.
    ///
    /// # Errors
    ///
    /// Propagates open/create failures.
    pub fn open_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::open(path)
        } else {
            Self::create(path)
        }
    }

    fn with_index(index: Index, fields: ShardFields) -> Result<Self> {
        let writer = index.writer_with_num_threads(1, WRITER_MEMORY_BYTES)?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        Ok(Self {
            index,
            reader,
            writer: Mutex::new(writer),
            fields,
        })
    }

    /// Number of live documents in the shard.
    #[must_use]
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Writes a batch of documents, committing once at the end.
    ///
    /// Applies the numeric coercion rule to non-reserved keys and assigns
    /// each document the id `{unix_nanos}-{source}-{batch_index}`.
    ///
    /// # Errors
    ///
    /// Returns an error when a document lacks a `timestamp` or the commit
    /// fails; nothing from a failed batch becomes visible.
    pub fn write_batch(&self, docs: &[LogDocument], source: &str) -> Result<()> {
        let schema = self.index.schema();
        let mut writer = self.writer.lock();

        for (i, doc) in docs.iter().enumerate() {
            let ts = doc
                .get("timestamp")
                .and_then(FieldValue::as_instant)
                .ok_or(StorageError::MissingTimestamp)?;
            let doc_id = format!(
                "{}-{source}-{i}",
                ts.timestamp_nanos_opt().unwrap_or_default()
            );
            let payload = encode_document(doc, &doc_id, ts)?;
            let tantivy_doc = TantivyDocument::parse_json(&schema, &payload)
                .map_err(|e| StorageError::DocumentEncoding(e.to_string()))?;
            writer.add_document(tantivy_doc)?;
        }

        writer.commit()?;
        self.reader.reload()?;
        Ok(())
    }

    /// Runs a query against this shard and applies the inclusive range
    /// filter in-process.
    ///
    /// # Errors
    ///
    /// Returns an error when the query does not parse or the search fails.
    pub fn search(
        &self,
        raw_query: &str,
        sources: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LogDocument>> {
        let searcher = self.reader.searcher();
        let query = self.build_query(raw_query, sources)?;
        let top_docs = searcher.search(&query, &TopDocs::with_limit(MAX_HITS_PER_SHARD))?;

        let schema = self.index.schema();
        let mut hits = Vec::with_capacity(top_docs.len());
        for (_score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address)?;
            let Some(entry) = named_doc_to_log(&doc.to_named_doc(&schema)) else {
                continue;
            };
            let Some(ts) = entry.get("timestamp").and_then(FieldValue::as_instant) else {
                continue;
            };
            if ts >= start && ts <= end {
                hits.push(entry);
            }
        }
        Ok(hits)
    }

    /// Builds the effective query: percent-decoded query string (match-all
    /// when empty) ANDed with an explicit `_src` disjunction when sources
    /// are given.
    fn build_query(&self, raw_query: &str, sources: &[String]) -> Result<Box<dyn Query>> {
        let decoded = percent_decode_str(raw_query).decode_utf8_lossy();
        let trimmed = decoded.trim();

        let base: Box<dyn Query> = if trimmed.is_empty() {
            Box::new(AllQuery)
        } else {
            let parser =
                QueryParser::for_index(&self.index, vec![self.fields.raw, self.fields.dynamic]);
            parser
                .parse_query(trimmed)
                .map_err(|e| StorageError::QueryParse {
                    query: trimmed.to_string(),
                    reason: e.to_string(),
                })?
        };

        if sources.is_empty() {
            return Ok(base);
        }

        let terms: Vec<Box<dyn Query>> = sources
            .iter()
            .map(|source| {
                Box::new(TermQuery::new(
                    Term::from_field_text(self.fields.src, source),
                    IndexRecordOption::Basic,
                )) as Box<dyn Query>
            })
            .collect();
        let disjunction = BooleanQuery::union(terms);
        Ok(Box::new(BooleanQuery::intersection(vec![
            base,
            Box::new(disjunction),
        ])))
    }

    /// Unique `_src` values in this shard, from the term dictionary.
    ///
    /// # Errors
    ///
    /// Returns an error when the inverted index cannot be read.
    pub fn source_names(&self) -> Result<BTreeSet<String>> {
        let searcher = self.reader.searcher();
        let mut names = BTreeSet::new();
        for segment in searcher.segment_readers() {
            let inverted = segment.inverted_index(self.fields.src)?;
            let mut stream = inverted.terms().stream()?;
            while stream.advance() {
                if let Ok(term) = std::str::from_utf8(stream.key()) {
                    if !term.is_empty() {
                        names.insert(term.to_string());
                    }
                }
            }
        }
        Ok(names)
    }

    /// Deletes documents whose `_id` is in `ids`.
    ///
    /// Returns the number of ids that existed in this shard.
    ///
    /// # Errors
    ///
    /// Returns an error when the deletion commit fails.
    pub fn delete_ids(&self, ids: &[String]) -> Result<usize> {
        let searcher = self.reader.searcher();
        let mut writer = self.writer.lock();
        let mut deleted = 0;

        for id in ids {
            let term = Term::from_field_text(self.fields.id, id);
            if searcher.doc_freq(&term)? > 0 {
                writer.delete_term(term);
                deleted += 1;
            }
        }

        if deleted > 0 {
            writer.commit()?;
            self.reader.reload()?;
        }
        Ok(deleted)
    }
}

/// Encodes a document into the shard's JSON shape: reserved fields at the
/// top level, everything else (coerced) inside the `fields` object.
fn encode_document(doc: &LogDocument, doc_id: &str, ts: DateTime<Utc>) -> Result<String> {
    let mut top = serde_json::Map::new();
    top.insert("_id".to_string(), serde_json::json!(doc_id));
    top.insert(
        "timestamp".to_string(),
        serde_json::json!(ts.to_rfc3339()),
    );

    let mut dynamic = serde_json::Map::new();
    for (key, value) in doc {
        match key.as_str() {
            "timestamp" => {}
            "_raw" | "_src" => {
                top.insert(key.clone(), serde_json::json!(value.to_string()));
            }
            _ => {
                dynamic.insert(key.clone(), field_to_json(key, value));
            }
        }
    }
    // The schema fields must always be present so hits round-trip.
    top.entry("_raw".to_string())
        .or_insert_with(|| serde_json::json!(""));
    top.entry("_src".to_string())
        .or_insert_with(|| serde_json::json!(""));
    top.insert("fields".to_string(), serde_json::Value::Object(dynamic));

    serde_json::to_string(&top).map_err(|e| StorageError::DocumentEncoding(e.to_string()))
}

/// Converts one field value to JSON, applying numeric coercion to string
/// values of non-underscore keys.
fn field_to_json(key: &str, value: &FieldValue) -> serde_json::Value {
    match value {
        FieldValue::Str(s) => {
            if key.starts_with('_') {
                serde_json::json!(s)
            } else {
                match coerce_scalar(s) {
                    FieldValue::Int(i) => serde_json::json!(i),
                    FieldValue::Float(x) => serde_json::json!(x),
                    _ => serde_json::json!(s),
                }
            }
        }
        FieldValue::Int(i) => serde_json::json!(i),
        FieldValue::Float(x) => serde_json::json!(x),
        FieldValue::Instant(ts) => serde_json::json!(ts.to_rfc3339()),
    }
}

/// Flattens a retrieved document back into a [`LogDocument`]: `fields`
/// entries are lifted to the top level, `timestamp` becomes an instant,
/// and the internal `_id` handle stays out of the result.
fn named_doc_to_log(named: &NamedFieldDocument) -> Option<LogDocument> {
    let json = serde_json::to_value(named).ok()?;
    let object = json.as_object()?;

    let mut doc = LogDocument::new();
    for (field, values) in object {
        let Some(first) = values.as_array().and_then(|list| list.first()) else {
            continue;
        };
        match field.as_str() {
            "_id" => {}
            "fields" => {
                if let Some(map) = first.as_object() {
                    for (key, value) in map {
                        doc.insert(key.clone(), FieldValue::from_json(value));
                    }
                }
            }
            "timestamp" => {
                if let Some(raw) = first.as_str() {
                    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
                        doc.insert(
                            "timestamp".to_string(),
                            FieldValue::Instant(ts.with_timezone(&Utc)),
                        );
                    }
                }
            }
            _ => {
                doc.insert(field.clone(), FieldValue::from_json(first));
            }
        }
    }
    Some(doc)
}
