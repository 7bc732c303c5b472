//! File-backed payload cache
//!
//! Stores the last successful raw API payload per (zone, academy) pair so
//! the resolver survives upstream outages and rate limits. Cache paths are
//! derived from sanitized labels, entries expire after a validity window,
//! and every failure mode here is non-fatal: a broken cache degrades
//! freshness, never correctness.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::cache;
use crate::errors::{CacheError, CacheResult};

/// Configuration for the cache store
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Directory holding the per-(zone, academy) cache files
    pub cache_root: PathBuf,
    /// How long an entry stays fresh
    pub validity_window: Duration,
}

impl CacheConfig {
    /// Cache configuration rooted under a host storage directory
    ///
    /// Files land in `{storage_root}/{CACHE_DIR_NAME}/` with the default
    /// validity window.
    pub fn under_storage_root(storage_root: &Path) -> Self {
        Self {
            cache_root: storage_root.join(cache::CACHE_DIR_NAME),
            validity_window: cache::VALIDITY_WINDOW,
        }
    }

    /// Override the validity window (used by tests and custom hosts)
    pub fn with_validity_window(mut self, window: Duration) -> Self {
        self.validity_window = window;
        self
    }
}

/// File-backed cache of raw upstream payloads
#[derive(Debug, Clone)]
pub struct CacheStore {
    config: CacheConfig,
}

impl CacheStore {
    /// Create a cache store with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Deterministic cache file path for a (zone, academy) pair
    ///
    /// Labels are sanitized to `[A-Za-z0-9_-]` before composing the file
    /// name, so attacker-influenced academy strings cannot traverse out of
    /// the cache directory.
    pub fn entry_path(&self, zone_label: &str, academy: &str) -> PathBuf {
        let file_name = format!(
            "{}_{}_{}.json",
            cache::CACHE_FILE_PREFIX,
            sanitize(zone_label),
            sanitize(academy)
        );
        self.config.cache_root.join(file_name)
    }

    /// Create the cache directory if needed, with owner-only permissions
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Io` if the directory cannot be created. Callers
    /// treat this as a cache miss.
    pub async fn ensure_dir(&self) -> CacheResult<()> {
        tokio::fs::create_dir_all(&self.config.cache_root).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(cache::CACHE_DIR_PERMISSIONS);
            tokio::fs::set_permissions(&self.config.cache_root, perms).await?;
        }
        Ok(())
    }

    /// Whether a fresh cache entry exists at this path
    ///
    /// True iff the file exists and its modification time is within the
    /// validity window. Any I/O error makes the entry invalid; this never
    /// fails.
    pub async fn is_valid(&self, path: &Path) -> bool {
        let age = match entry_age(path).await {
            Ok(age) => age,
            Err(e) => {
                debug!("Cache entry {} not usable: {}", path.display(), e);
                return false;
            }
        };
        age < self.config.validity_window
    }

    /// Load the raw payload stored at this path
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Miss` if no file exists, or `Io`/`Corrupted`
    /// on read and decode failures. All of these are non-fatal to callers.
    pub async fn load(&self, path: &Path) -> CacheResult<Value> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CacheError::Miss {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let payload = serde_json::from_slice(&bytes)?;
        debug!("Loaded cached payload from {}", path.display());
        Ok(payload)
    }

    /// Persist a raw payload, best-effort
    ///
    /// Failures are logged and swallowed: caching is an optimization, never
    /// a correctness requirement.
    pub async fn save(&self, path: &Path, payload: &Value) {
        if let Err(e) = self.try_save(path, payload).await {
            warn!("Failed to cache payload at {}: {}", path.display(), e);
        }
    }

    async fn try_save(&self, path: &Path, payload: &Value) -> CacheResult<()> {
        // Pretty-printed UTF-8; serde_json leaves non-ASCII unescaped
        let text = serde_json::to_string_pretty(payload)?;
        tokio::fs::write(path, text).await?;
        debug!("Cached payload at {}", path.display());
        Ok(())
    }
}

/// Age of the file at `path` since its last modification
async fn entry_age(path: &Path) -> std::io::Result<Duration> {
    let metadata = tokio::fs::metadata(path).await?;
    let modified = metadata.modified()?;
    modified
        .elapsed()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Replace every character outside `[A-Za-z0-9_-]` with `_`
fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
