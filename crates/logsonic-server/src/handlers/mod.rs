//! HTTP request handlers for the `/api/v1` surface.

pub mod grok;
pub mod info;
pub mod ingest;
pub mod logs;
pub mod parse;
pub mod ping;
pub mod statics;

pub use grok::{create_pattern, delete_pattern, list_patterns};
pub use info::system_info;
pub use ingest::{ingest_end, ingest_logs, ingest_start};
pub use logs::{clear_logs, read_logs};
pub use parse::parse_or_suggest;
pub use ping::ping;
pub use statics::spa_fallback;
