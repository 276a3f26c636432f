//! Cache persistence for reusing downloaded responses across runs.
//!
//! A snapshot is a JSON document holding every cached URL and its body,
//! so a later session can answer the same requests without the network.

use kegg::MemoryCache;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current snapshot format version.
const SNAPSHOT_VERSION: u32 = 1;

/// A saved response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Format version for compatibility checking.
    pub version: u32,

    /// When the snapshot was taken (seconds since the Unix epoch).
    pub saved_at: String,

    /// Cached bodies keyed by request URL.
    pub entries: MemoryCache,
}

impl CacheSnapshot {
    pub fn new(entries: MemoryCache) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: unix_now(),
            entries,
        }
    }

    /// Save to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::debug!(path = %path.display(), entries = self.entries.len(), "saved cache snapshot");
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&content)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }

        tracing::debug!(path = %path.display(), entries = snapshot.entries.len(), "loaded cache snapshot");
        Ok(snapshot)
    }
}

/// Write `cache` to `path`.
pub fn dump_cache(cache: &MemoryCache, path: impl AsRef<Path>) -> Result<(), PersistError> {
    CacheSnapshot::new(cache.clone()).save_json(path)
}

/// Read a cache previously written with [`dump_cache`].
pub fn load_cache(path: impl AsRef<Path>) -> Result<MemoryCache, PersistError> {
    Ok(CacheSnapshot::load_json(path)?.entries)
}

fn unix_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", now.as_secs())
}
