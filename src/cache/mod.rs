//! Processed-set cache.
//!
//! The cache records every file path that has already been uploaded so a
//! repeated run skips it. It is the only state exif-database persists between
//! runs and lives in the user data directory (see
//! [`crate::config::default_cache_path`]).
//!
//! # File Format
//!
//! A JSON object mapping path strings to `true`:
//!
//! ```json
//! {
//!   "/photos/2023/DSC01234.ARW": true,
//!   "/photos/2023/DSC01235.ARW": true
//! }
//! ```
//!
//! # Lifecycle
//!
//! Loaded once at the start of a run and saved once at the end of a
//! successful run, after the database insert. A failed run leaves the file
//! untouched.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::ExifDatabaseError;
use crate::utils::fs::safe_write;

/// Paths already uploaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedCache {
    entries: BTreeMap<String, bool>,
}

impl ProcessedCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the cache from disk.
    ///
    /// A missing or empty file gives an empty cache: the first run has no
    /// history.
    ///
    /// # Errors
    ///
    /// - The file exists but cannot be read
    /// - The file is not a JSON object of path to boolean
    ///   ([`ExifDatabaseError::CacheParseError`])
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use exif_database::cache::ProcessedCache;
    /// use std::path::Path;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let cache = ProcessedCache::load(Path::new("missing.json"))?;
    /// assert!(cache.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No processed-set cache at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).with_context(|| {
            format!(
                "Cannot read processed-set cache: {}\n\n\
                    Check file ownership and permissions",
                path.display()
            )
        })?;

        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let entries: BTreeMap<String, bool> =
            serde_json::from_str(&content).map_err(|e| ExifDatabaseError::CacheParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Loaded {} cached paths from {}", entries.len(), path.display());
        Ok(Self {
            entries,
        })
    }

    /// Write the whole cache to `path` atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize processed-set cache")?;

        safe_write(path, &content).with_context(|| {
            format!("Failed to write processed-set cache: {}", path.display())
        })?;

        tracing::debug!("Saved {} cached paths to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Whether `path` was marked as uploaded.
    ///
    /// Presence of the key is what counts; the stored value is only a sentinel.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Mark `path` as uploaded.
    pub fn mark(&mut self, path: impl Into<String>) {
        self.entries.insert(path.into(), true);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
