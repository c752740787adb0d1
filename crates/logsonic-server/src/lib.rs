//! # logsonic-server
//!
//! The HTTP surface of LogSonic.
//!
//! This crate provides:
//!
//! - [`config::ServerConfig`] — Boot configuration (flags over env vars)
//! - [`state::AppState`] — The server context passed to every handler
//! - [`routes::create_router`] — The `/api/v1` router with middleware
//! - The read path: typed sorting, column union, log distribution

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod distribution;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod sort;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
