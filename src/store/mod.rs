//! Persistence of picture documents.
//!
//! [`DocumentStore`] is the seam the upload pipeline writes through.
//! [`MongoStore`] is the production implementation backed by the official
//! MongoDB driver.

use anyhow::Result;
use mongodb::bson::Document;
use mongodb::{Client, Collection};

use crate::config::MongoSettings;
use crate::core::ExifDatabaseError;
use crate::document::PictureDocument;

/// A destination for picture documents.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Insert all documents in one bulk operation.
    ///
    /// An empty slice does nothing. A duplicate identifier is an error.
    async fn insert_many(&self, docs: &[PictureDocument]) -> Result<()>;
}

/// MongoDB collection holding one document per picture.
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Build a client from the configured URI and select the collection.
    ///
    /// The driver connects lazily, so an unreachable server is reported by
    /// the first insert rather than here.
    ///
    /// # Errors
    ///
    /// - [`ExifDatabaseError::ConfigError`] when no URI is configured
    /// - [`ExifDatabaseError::DatabaseError`] when the URI cannot be parsed
    pub async fn connect(settings: &MongoSettings) -> Result<Self> {
        let uri = settings.uri.as_deref().ok_or_else(|| ExifDatabaseError::ConfigError {
            message: "MongoDB URI is not set".to_string(),
        })?;

        let client = Client::with_uri_str(uri).await.map_err(|e| database_error("connect", &e))?;
        tracing::debug!(
            "Using MongoDB collection {}.{}",
            settings.database,
            settings.collection
        );

        Ok(Self {
            collection: client.database(&settings.database).collection(&settings.collection),
        })
    }

    #[must_use]
    pub fn namespace(&self) -> String {
        self.collection.namespace().to_string()
    }
}

impl DocumentStore for MongoStore {
    async fn insert_many(&self, docs: &[PictureDocument]) -> Result<()> {
        if docs.is_empty() {
            return Ok(());
        }

        let bson_docs: Vec<Document> = docs.iter().map(PictureDocument::to_bson).collect();
        let result = self
            .collection
            .insert_many(bson_docs)
            .await
            .map_err(|e| database_error("insert_many", &e))?;

        tracing::debug!("Inserted {} documents into {}", result.inserted_ids.len(), self.namespace());
        Ok(())
    }
}

fn database_error(operation: &str, error: &mongodb::error::Error) -> ExifDatabaseError {
    ExifDatabaseError::DatabaseError {
        operation: operation.to_string(),
        reason: error.to_string(),
    }
}
