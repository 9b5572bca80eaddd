//! The upload pipeline.
//!
//! One run scans a directory tree, extracts and normalizes metadata for every
//! file not yet recorded in the processed-set cache, writes all new documents
//! in a single bulk insert, and then persists the updated cache.
//!
//! # Failure Semantics
//!
//! Any failure (extraction, normalization, insert) aborts the run before the
//! cache is written. Files collected before the failure are neither inserted
//! nor marked, so the next run retries them.
//!
//! # Examples
//!
//! ```rust,no_run
//! use exif_database::config::Settings;
//! use exif_database::exiftool::ExifTool;
//! use exif_database::store::MongoStore;
//! use exif_database::uploader::Uploader;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::load().await?;
//! let store = MongoStore::connect(&settings.mongo).await?;
//! let uploader = Uploader::new(ExifTool::default(), store, settings.cache_path()?);
//!
//! let summary = uploader.run(Path::new("/photos"), "ARW").await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::cache::ProcessedCache;
use crate::core::ExifDatabaseError;
use crate::document::PictureDocument;
use crate::exiftool::MetadataSource;
use crate::metadata;
use crate::scanner;
use crate::store::DocumentStore;
use crate::utils::ProgressBar;

/// Counts reported at the end of a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Files with the scanned extension found under the root.
    pub scanned: usize,
    /// Files skipped because the cache already listed them.
    pub skipped: usize,
    /// Documents inserted by this run.
    pub uploaded: usize,
}

impl fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files found, {} uploaded, {} skipped",
            self.scanned, self.uploaded, self.skipped
        )
    }
}

/// Drives one upload run from a metadata source into a document store.
pub struct Uploader<S, D> {
    source: S,
    store: D,
    cache_path: PathBuf,
}

impl<S: MetadataSource, D: DocumentStore> Uploader<S, D> {
    pub fn new(source: S, store: D, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            store,
            cache_path: cache_path.into(),
        }
    }

    #[must_use]
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    pub const fn store(&self) -> &D {
        &self.store
    }

    /// Upload every new file with `extension` under `root`.
    ///
    /// # Errors
    ///
    /// - [`ExifDatabaseError::RootNotFound`] if `root` is not a directory
    /// - [`ExifDatabaseError::CacheParseError`] if the cache file is corrupt
    /// - [`ExifDatabaseError::ExtractionFailed`] if exiftool fails on a file
    /// - [`ExifDatabaseError::Metadata`] if a value does not fit its field
    /// - [`ExifDatabaseError::DatabaseError`] if the bulk insert fails
    pub async fn run(&self, root: &Path, extension: &str) -> Result<UploadSummary> {
        let mut cache = ProcessedCache::load(&self.cache_path)?;

        let files = scanner::find_files(root, extension)?;
        let mut summary = UploadSummary {
            scanned: files.len(),
            ..UploadSummary::default()
        };

        let progress = ProgressBar::new(files.len() as u64);
        let mut batch = Vec::new();

        for file in &files {
            let path = path_key(file);
            progress.inc(1);

            if cache.contains(&path) {
                progress.suspend(|| info!("Skipping {}", path));
                summary.skipped += 1;
                continue;
            }

            progress.set_message(path.clone());
            progress.suspend(|| info!("Uploading {}", path));

            let document = match self.collect(file, &path).await {
                Ok(document) => document,
                Err(e) => {
                    progress.finish_and_clear();
                    return Err(e);
                }
            };
            batch.push(document);
            cache.mark(path);
        }
        progress.finish_and_clear();

        if !batch.is_empty() {
            self.store.insert_many(&batch).await?;
            summary.uploaded = batch.len();
        }

        cache.save(&self.cache_path)?;

        Ok(summary)
    }

    async fn collect(&self, file: &Path, path: &str) -> Result<PictureDocument> {
        let raw = self.source.extract(file).await?;
        let record = metadata::normalize(&raw).map_err(|source| ExifDatabaseError::Metadata {
            path: path.to_string(),
            source,
        })?;
        debug!("Normalized {} fields for {}", record.len(), path);
        Ok(PictureDocument::new(path, record))
    }
}

/// The string recorded in the cache and in the document's `path` field.
///
/// Names that are not valid UTF-8 are recorded lossily, with `U+FFFD` in place
/// of the invalid bytes, so two such files can end up with the same key.
fn path_key(file: &Path) -> String {
    if let Some(path) = file.to_str() {
        return path.to_string();
    }

    let lossy = file.to_string_lossy().into_owned();
    warn!("Path {} is not valid UTF-8, recording it as {}", file.display(), lossy);
    lossy
}
