//! Shared state passed to every handler.

use std::sync::Arc;
use std::time::{Duration, Instant};

use logsonic_grok::PatternCatalog;
use logsonic_ingest::SessionRegistry;
use logsonic_storage::Storage;
use logsonic_types::SystemInfoResponse;
use parking_lot::Mutex;

use crate::config::ServerConfig;

/// How long a computed `/info` summary stays fresh.
const INFO_CACHE_TTL: Duration = Duration::from_secs(10);

/// The server context: the two pieces of process-wide state plus storage.
pub struct AppState {
    /// Boot configuration.
    pub config: ServerConfig,
    /// The storage engine.
    pub storage: Arc<Storage>,
    /// The pattern catalog.
    pub catalog: Arc<PatternCatalog>,
    /// The ingest session registry.
    pub sessions: Arc<SessionRegistry>,
    info_cache: Mutex<Option<(Instant, SystemInfoResponse)>>,
}

impl AppState {
    /// Creates the server context.
    #[must_use]
    pub fn new(
        config: ServerConfig,
        storage: Arc<Storage>,
        catalog: Arc<PatternCatalog>,
        sessions: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            config,
            storage,
            catalog,
            sessions,
            info_cache: Mutex::new(None),
        }
    }

    /// Returns the cached `/info` response when it is still fresh.
    #[must_use]
    pub fn cached_info(&self) -> Option<SystemInfoResponse> {
        let cache = self.info_cache.lock();
        match cache.as_ref() {
            Some((stamp, info)) if stamp.elapsed() < INFO_CACHE_TTL => Some(info.clone()),
            _ => None,
        }
    }

    /// Stores a freshly computed `/info` response.
    pub fn cache_info(&self, info: SystemInfoResponse) {
        *self.info_cache.lock() = Some((Instant::now(), info));
    }

    /// Drops the cached `/info` response; called after writes.
    pub fn invalidate_info_cache(&self) {
        *self.info_cache.lock() = None;
    }
}
