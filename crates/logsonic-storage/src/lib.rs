//! # logsonic-storage
//!
//! Day-sharded full-text storage for parsed log documents.
//!
//! This crate provides:
//!
//! - [`Storage`] — The storage engine: store, search, list, count, delete
//! - [`Shard`] — One tantivy index per UTC calendar day
//! - Concurrent cross-shard search bounded by `2 × cpu_count` tasks
//!
//! Each shard is an independent index with a fixed schema; documents are
//! grouped by the UTC day of their `timestamp` at store time.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod shard;
pub mod store;

pub use error::{Result, StorageError};
pub use shard::Shard;
pub use store::{SearchOutcome, Storage};
