//! The persistent catalog of named Grok patterns.
//!
//! One catalog instance lives in the server context. It is serialized as a
//! single `grok.json` document co-located with the shard directories and is
//! seeded with the built-in defaults the first time it loads.

use std::fs;
use std::path::{Path, PathBuf};

use logsonic_types::GrokPatternDefinition;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::defaults::default_patterns;
use crate::error::{GrokError, Result};

/// File name of the catalog document under the storage directory.
pub const CATALOG_FILE: &str = "grok.json";

#[derive(Serialize, Deserialize)]
struct CatalogFile {
    patterns: Vec<GrokPatternDefinition>,
}

/// The authoritative set of named Grok patterns.
pub struct PatternCatalog {
    path: PathBuf,
    patterns: Mutex<Vec<GrokPatternDefinition>>,
}

impl PatternCatalog {
    /// Creates a catalog backed by `grok.json` under `base_dir`.
    ///
    /// Call [`PatternCatalog::load`] before use.
    #[must_use]
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: base_dir.as_ref().join(CATALOG_FILE),
            patterns: Mutex::new(Vec::new()),
        }
    }

    /// Loads the catalog from disk, seeding defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns [`GrokError::MalformedCatalog`] when the file exists but
    /// cannot be parsed (a startup failure, not a silent fallback), or an
    /// I/O error.
    pub fn load(&self) -> Result<()> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no catalog file found, seeding defaults");
            *self.patterns.lock() = default_patterns();
            return self.save();
        }

        let data = fs::read_to_string(&self.path)?;
        let parsed: CatalogFile =
            serde_json::from_str(&data).map_err(|source| GrokError::MalformedCatalog {
                path: self.path.display().to_string(),
                source,
            })?;

        *self.patterns.lock() = parsed.patterns;
        Ok(())
    }

    /// Writes the catalog to disk as 2-space-indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<()> {
        let file = CatalogFile {
            patterns: self.patterns.lock().clone(),
        };
        let data = serde_json::to_string_pretty(&file)?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, data)?;
        Ok(())
    }

    /// Returns a copy of every definition, catalog order.
    #[must_use]
    pub fn get_all(&self) -> Vec<GrokPatternDefinition> {
        self.patterns.lock().clone()
    }

    /// Appends a definition and persists the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GrokError::Conflict`] when the name is already taken.
    pub fn add(&self, def: GrokPatternDefinition) -> Result<()> {
        {
            let mut patterns = self.patterns.lock();
            if patterns.iter().any(|existing| existing.name == def.name) {
                return Err(GrokError::Conflict(def.name));
            }
            patterns.push(def);
        }
        self.save()
    }

    /// Removes a definition by name and persists the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GrokError::NotFound`] for an unknown name.
    pub fn delete(&self, name: &str) -> Result<()> {
        {
            let mut patterns = self.patterns.lock();
            let before = patterns.len();
            patterns.retain(|def| def.name != name);
            if patterns.len() == before {
                return Err(GrokError::NotFound(name.to_string()));
            }
        }
        self.save()
    }

    /// Looks up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<GrokPatternDefinition> {
        self.patterns.lock().iter().find(|def| def.name == name).cloned()
    }
}
