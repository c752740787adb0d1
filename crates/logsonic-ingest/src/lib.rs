//! # logsonic-ingest
//!
//! The ingest session machine.
//!
//! This crate provides:
//!
//! - [`SessionRegistry`] — Process-wide map of active ingest sessions
//! - [`IngestSession`] — A session owning a private, pre-compiled tokenizer
//! - [`run_expiry_sweeper`] — Background removal of sessions past their TTL
//!
//! Every session owns its own [`logsonic_grok::Tokenizer`], so concurrent
//! ingests with different patterns cannot contaminate each other's tables.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod registry;

pub use error::{IngestError, Result};
pub use registry::{run_expiry_sweeper, IngestSession, SessionRegistry, SESSION_TIMEOUT};
