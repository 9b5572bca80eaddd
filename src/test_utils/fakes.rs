//! In-memory implementations of the pipeline seams.

use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::ExifDatabaseError;
use crate::document::PictureDocument;
use crate::exiftool::MetadataSource;
use crate::store::DocumentStore;

/// Document store backed by a vector.
///
/// Mirrors the constraints of the real collection: identifiers are unique
/// across all inserts, and a batch containing a duplicate is rejected whole.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<PictureDocument>>,
    insert_calls: AtomicUsize,
    failure: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every insert fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Snapshot of all stored documents in insertion order.
    pub fn documents(&self) -> Vec<PictureDocument> {
        self.documents.lock().map(|docs| docs.clone()).unwrap_or_default()
    }

    /// Number of non-empty insert calls received.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

impl DocumentStore for MemoryStore {
    async fn insert_many(&self, docs: &[PictureDocument]) -> Result<()> {
        if docs.is_empty() {
            return Ok(());
        }
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = &self.failure {
            return Err(ExifDatabaseError::DatabaseError {
                operation: "insert_many".to_string(),
                reason: reason.clone(),
            }
            .into());
        }

        let mut stored = self
            .documents
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;

        let mut seen: HashSet<&str> = stored.iter().map(PictureDocument::id).collect();
        for doc in docs {
            if !seen.insert(doc.id()) {
                return Err(ExifDatabaseError::DatabaseError {
                    operation: "insert_many".to_string(),
                    reason: format!("E11000 duplicate key error: {{ _id: \"{}\" }}", doc.id()),
                }
                .into());
            }
        }

        stored.extend(docs.iter().cloned());
        Ok(())
    }
}

/// Metadata source returning canned output per path.
///
/// Paths without an entry fail the way exiftool does for a missing file.
#[derive(Debug, Default)]
pub struct StaticMetadataSource {
    outputs: HashMap<PathBuf, std::result::Result<String, String>>,
    calls: Mutex<Vec<PathBuf>>,
}

impl StaticMetadataSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `output` when `path` is extracted.
    #[must_use]
    pub fn with_output(mut self, path: impl AsRef<Path>, output: &str) -> Self {
        self.outputs.insert(path.as_ref().to_path_buf(), Ok(output.to_string()));
        self
    }

    /// Fail extraction of `path` with `stderr`.
    #[must_use]
    pub fn with_failure(mut self, path: impl AsRef<Path>, stderr: &str) -> Self {
        self.outputs.insert(path.as_ref().to_path_buf(), Err(stderr.to_string()));
        self
    }

    /// Paths extracted so far, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl MetadataSource for StaticMetadataSource {
    async fn extract(&self, path: &Path) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(path.to_path_buf());
        }

        match self.outputs.get(path) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(stderr)) => Err(ExifDatabaseError::ExtractionFailed {
                path: path.display().to_string(),
                stderr: stderr.clone(),
            }
            .into()),
            None => Err(ExifDatabaseError::ExtractionFailed {
                path: path.display().to_string(),
                stderr: format!("Error: File not found - {}", path.display()),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataRecord;

    #[tokio::test]
    async fn test_memory_store_rejects_duplicates() {
        let store = MemoryStore::new();
        let a = PictureDocument::new("/photos/A.ARW", MetadataRecord::default());
        let a_lower = PictureDocument::new("/photos/a.arw", MetadataRecord::default());

        store.insert_many(std::slice::from_ref(&a)).await.unwrap();
        let err = store.insert_many(&[a_lower]).await.unwrap_err();
        assert!(err.to_string().contains("duplicate key"));
        assert_eq!(store.documents(), vec![a]);
    }

    #[tokio::test]
    async fn test_static_source_unknown_path_fails() {
        let source = StaticMetadataSource::new().with_output("/a.ARW", "Make : SONY\n");
        assert_eq!(source.extract(Path::new("/a.ARW")).await.unwrap(), "Make : SONY\n");
        assert!(source.extract(Path::new("/b.ARW")).await.is_err());
        assert_eq!(source.calls().len(), 2);
    }
}
