//! The day-sharded storage engine.
//!
//! Maps dates to [`Shard`]s, opening or creating them on demand. Search
//! fans out one task per candidate day, bounded by a semaphore at
//! `2 × cpu_count` concurrent shard searches; per-shard errors are
//! captured and the first one is returned after sibling tasks finish.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Months, Utc};
use logsonic_types::{FieldValue, LogDocument};
use parking_lot::Mutex;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::{Result, StorageError};
use crate::shard::Shard;

/// Shard directory prefix.
const SHARD_PREFIX: &str = "logs-";

/// Shard directory extension.
const SHARD_EXT: &str = "tantivy";

/// Shard date format (UTC day).
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Result of a search: the merged hits and the time spent in storage.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Hits from all shards, unordered.
    pub documents: Vec<LogDocument>,
    /// Wall-clock time of the fan-out.
    pub elapsed: Duration,
}

/// Day-sharded log storage rooted at a base directory.
pub struct Storage {
    base_dir: PathBuf,
    shards: Mutex<HashMap<String, Arc<Shard>>>,
}

impl Storage {
    /// Opens storage at `base_dir`, creating the directory if needed and
    /// reopening any shards already on disk.
    ///
    /// A shard that fails to open is skipped with a warning; it will be
    /// retried on first access.
    ///
    /// # Errors
    ///
    /// Returns an error when the base directory cannot be created or
    /// listed.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;

        let storage = Self {
            base_dir,
            shards: Mutex::new(HashMap::new()),
        };

        for date in storage.list()? {
            let path = storage.shard_path(&date);
            match Shard::open(&path) {
                Ok(shard) => {
                    storage.shards.lock().insert(date, Arc::new(shard));
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping shard that failed to open");
                }
            }
        }

        let count = storage.shards.lock().len();
        info!(base_dir = %storage.base_dir.display(), shards = count, "storage opened");
        Ok(storage)
    }

    /// The base directory holding shards and the catalog file.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn shard_path(&self, date: &str) -> PathBuf {
        self.base_dir.join(format!("{SHARD_PREFIX}{date}.{SHARD_EXT}"))
    }

    /// Returns the shard for `date`, opening or creating it on demand.
    fn get_or_create(&self, date: &str) -> Result<Arc<Shard>> {
        let mut shards = self.shards.lock();
        if let Some(shard) = shards.get(date) {
            return Ok(shard.clone());
        }
        let shard = Arc::new(Shard::open_or_create(&self.shard_path(date))?);
        shards.insert(date.to_string(), shard.clone());
        Ok(shard)
    }

    /// Stores parsed documents, grouped per UTC day of their `timestamp`.
    ///
    /// # Errors
    ///
    /// A failed day aborts the call; days committed before the failure
    /// remain visible (no cross-shard atomicity).
    pub fn store(&self, docs: &[LogDocument], source: &str) -> Result<()> {
        let mut by_date: BTreeMap<String, Vec<LogDocument>> = BTreeMap::new();
        for doc in docs {
            let ts = doc
                .get("timestamp")
                .and_then(FieldValue::as_instant)
                .ok_or(StorageError::MissingTimestamp)?;
            by_date
                .entry(ts.format(DATE_FORMAT).to_string())
                .or_default()
                .push(doc.clone());
        }

        for (date, group) in by_date {
            let shard = self.get_or_create(&date)?;
            debug!(date = %date, count = group.len(), "committing batch");
            shard.write_batch(&group, source)?;
        }
        Ok(())
    }

    /// Lists the dates that have a shard on disk, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error when the base directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut dates = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(date) = name
                .strip_prefix(SHARD_PREFIX)
                .and_then(|rest| rest.strip_suffix(&format!(".{SHARD_EXT}")))
            {
                if date.len() == 10 {
                    dates.push(date.to_string());
                }
            }
        }
        dates.sort();
        Ok(dates)
    }

    /// Number of documents in the shard for `date`.
    ///
    /// # Errors
    ///
    /// Returns an error when the shard cannot be opened.
    pub fn get_doc_count(&self, date: &str) -> Result<u64> {
        Ok(self.get_or_create(date)?.num_docs())
    }

    /// Unique `_src` values across every shard.
    ///
    /// # Errors
    ///
    /// Returns an error when a shard cannot be opened or read.
    pub fn get_source_names(&self) -> Result<Vec<String>> {
        let mut names = BTreeSet::new();
        for date in self.list()? {
            let shard = self.get_or_create(&date)?;
            names.extend(shard.source_names()?);
        }
        Ok(names.into_iter().collect())
    }

    /// Deletes documents by id across every shard.
    ///
    /// The caller does not know which shard owns which id, so every shard
    /// is consulted. Returns the number of ids that actually existed.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn delete_by_ids(&self, ids: &[String]) -> Result<usize> {
        let mut deleted = 0;
        for date in self.list()? {
            let shard = self.get_or_create(&date)?;
            deleted += shard.delete_ids(ids)?;
        }
        Ok(deleted)
    }

    /// Closes every shard and removes all shard directories.
    ///
    /// # Errors
    ///
    /// Returns the first removal error.
    pub fn clear(&self) -> Result<()> {
        self.shards.lock().clear();
        for date in self.list()? {
            let path = self.shard_path(&date);
            fs::remove_dir_all(&path)?;
        }
        info!("storage cleared");
        Ok(())
    }

    /// Searches all day shards overlapping `[start, end]`.
    ///
    /// Defaults: `start` one year ago, `end` now. The query string follows
    /// the index engine's query-string syntax and is percent-decoded
    /// before parsing; an empty query matches everything. A non-empty
    /// `sources` list restricts hits to those `_src` values.
    ///
    /// # Errors
    ///
    /// Per-shard errors are collected and the first one is returned after
    /// all tasks finish.
    pub async fn search(
        &self,
        query: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        sources: &[String],
    ) -> Result<SearchOutcome> {
        let now = Utc::now();
        let start = start.unwrap_or_else(|| now - Months::new(12));
        let end = end.unwrap_or(now);

        let existing: BTreeSet<String> = self.list()?.into_iter().collect();
        if existing.is_empty() {
            return Ok(SearchOutcome::default());
        }

        let mut targets: Vec<Arc<Shard>> = Vec::new();
        let mut day = start.date_naive();
        let last = end.date_naive();
        while day <= last {
            let date = day.format(DATE_FORMAT).to_string();
            if existing.contains(&date) {
                targets.push(self.get_or_create(&date)?);
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        let started = Instant::now();
        let max_concurrency = 2 * std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(2);
        let semaphore = Arc::new(Semaphore::new(max_concurrency));

        let mut tasks: JoinSet<Result<Vec<LogDocument>>> = JoinSet::new();
        for shard in targets {
            let semaphore = semaphore.clone();
            let query = query.to_string();
            let sources = sources.to_vec();
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| StorageError::TaskFailed(e.to_string()))?;
                tokio::task::spawn_blocking(move || shard.search(&query, &sources, start, end))
                    .await
                    .map_err(|e| StorageError::TaskFailed(e.to_string()))?
            });
        }

        let mut documents = Vec::new();
        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(mut hits)) => documents.append(&mut hits),
                Ok(Err(e)) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(StorageError::TaskFailed(e.to_string()));
                    }
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }
        Ok(SearchOutcome {
            documents,
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn make_doc(ts: DateTime<Utc>, raw: &str, src: &str) -> LogDocument {
        let mut doc = LogDocument::new();
        doc.insert("timestamp".to_string(), FieldValue::Instant(ts));
        doc.insert("_raw".to_string(), FieldValue::Str(raw.to_string()));
        doc.insert("_src".to_string(), FieldValue::Str(src.to_string()));
        doc
    }

    #[test]
    fn store_creates_one_shard_per_day() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        let day1 = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
        let day2 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 1).unwrap();
        storage
            .store(
                &[make_doc(day1, "late line", "s"), make_doc(day2, "early line", "s")],
                "s",
            )
            .unwrap();

        assert_eq!(
            storage.list().unwrap(),
            vec!["2024-01-01".to_string(), "2024-01-02".to_string()]
        );
        assert_eq!(storage.get_doc_count("2024-01-01").unwrap(), 1);
        assert_eq!(storage.get_doc_count("2024-01-02").unwrap(), 1);
    }

    #[tokio::test]
    async fn search_fans_out_across_days() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        let day1 = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
        let day2 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 1).unwrap();
        storage
            .store(&[make_doc(day1, "one", "s"), make_doc(day2, "two", "s")], "s")
            .unwrap();

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 23, 59, 59).unwrap();
        let outcome = storage.search("", Some(start), Some(end), &[]).await.unwrap();
        assert_eq!(outcome.documents.len(), 2);
    }

    #[tokio::test]
    async fn search_applies_exact_range_filter() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let at = |h| Utc.with_ymd_and_hms(2024, 3, 5, h, 0, 0).unwrap();

        storage
            .store(
                &[make_doc(at(8), "early", "s"), make_doc(at(12), "noon", "s")],
                "s",
            )
            .unwrap();

        let outcome = storage
            .search("", Some(at(11)), Some(at(13)), &[])
            .await
            .unwrap();
        assert_eq!(outcome.documents.len(), 1);
        assert_eq!(outcome.documents[0]["_raw"].as_str(), Some("noon"));
    }

    #[tokio::test]
    async fn search_filters_by_source_union() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();

        storage
            .store(
                &[
                    make_doc(ts, "a", "host1"),
                    make_doc(ts, "b", "host2"),
                    make_doc(ts, "c", "host3"),
                ],
                "mixed",
            )
            .unwrap();

        let sources = vec!["host1".to_string(), "host3".to_string()];
        let outcome = storage.search("", None, None, &sources).await.unwrap();
        assert_eq!(outcome.documents.len(), 2);
    }

    #[tokio::test]
    async fn search_with_no_shards_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let outcome = storage.search("anything", None, None, &[]).await.unwrap();
        assert!(outcome.documents.is_empty());
    }

    #[tokio::test]
    async fn search_decodes_percent_encoded_queries() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();

        let mut doc = make_doc(ts, "line", "s");
        doc.insert(
            "hostname".to_string(),
            FieldValue::Str("myhost".to_string()),
        );
        storage.store(&[doc], "s").unwrap();

        let outcome = storage
            .search("hostname%3Amyhost", None, None, &[])
            .await
            .unwrap();
        assert_eq!(outcome.documents.len(), 1);
    }

    #[tokio::test]
    async fn stored_document_round_trips_through_match_all() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();

        let mut doc = make_doc(ts, "sshd failure", "host1");
        doc.insert("pid".to_string(), FieldValue::Str("42".to_string()));
        doc.insert("program".to_string(), FieldValue::Str("sshd".to_string()));
        storage.store(&[doc], "host1").unwrap();

        let outcome = storage.search("", None, None, &[]).await.unwrap();
        let hit = &outcome.documents[0];
        assert_eq!(hit["_raw"].as_str(), Some("sshd failure"));
        assert_eq!(hit["_src"].as_str(), Some("host1"));
        assert_eq!(hit["timestamp"].as_instant(), Some(ts));
        assert_eq!(hit["pid"], FieldValue::Int(42));
        assert_eq!(hit["program"].as_str(), Some("sshd"));
    }

    #[test]
    fn delete_by_ids_reports_existing_ids_only() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();

        storage.store(&[make_doc(ts, "x", "s")], "s").unwrap();
        let nanos = ts.timestamp_nanos_opt().unwrap();
        let real = format!("{nanos}-s-0");
        let deleted = storage
            .delete_by_ids(&[real, "999-ghost-7".to_string()])
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(storage.get_doc_count("2024-03-05").unwrap(), 0);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();

        storage.store(&[make_doc(ts, "x", "s")], "s").unwrap();
        storage.clear().unwrap();

        assert!(storage.list().unwrap().is_empty());
        let outcome = storage.search("", None, None, &[]).await.unwrap();
        assert!(outcome.documents.is_empty());
    }

    #[test]
    fn reopen_scans_existing_shards() {
        let dir = TempDir::new().unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        {
            let storage = Storage::open(dir.path()).unwrap();
            storage.store(&[make_doc(ts, "persisted", "s")], "s").unwrap();
        }

        let storage = Storage::open(dir.path()).unwrap();
        assert_eq!(storage.list().unwrap(), vec!["2024-03-05".to_string()]);
        assert_eq!(storage.get_doc_count("2024-03-05").unwrap(), 1);
    }

    #[test]
    fn source_names_union_across_shards() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let day1 = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();

        storage
            .store(
                &[make_doc(day1, "a", "host1"), make_doc(day2, "b", "host2")],
                "x",
            )
            .unwrap();

        assert_eq!(
            storage.get_source_names().unwrap(),
            vec!["host1".to_string(), "host2".to_string()]
        );
    }
}
