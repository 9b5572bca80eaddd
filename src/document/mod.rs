//! Database documents built from normalized metadata.
//!
//! Each processed file becomes one [`PictureDocument`]: its metadata record
//! plus two generated fields, `_id` and `path`.
//!
//! # Identifiers
//!
//! The `_id` is the lowercase hex SHA-1 digest of the lowercased path string.
//! Two paths that differ only in letter case therefore map to the same
//! identifier, and a second insert of either one is rejected by the database
//! as a duplicate key.

use mongodb::bson::{self, Bson, Document};
use sha1::{Digest, Sha1};

use crate::metadata::{MetadataRecord, MetadataValue};

/// Name of the generated identifier field.
pub const ID_FIELD: &str = "_id";
/// Name of the generated path field.
pub const PATH_FIELD: &str = "path";

/// Compute the document identifier for a file path.
///
/// # Examples
///
/// ```rust
/// use exif_database::document::document_id;
///
/// assert_eq!(document_id("/Photos/A.ARW"), document_id("/photos/a.arw"));
/// assert_eq!(document_id("/photos/a.arw").len(), 40);
/// ```
#[must_use]
pub fn document_id(path: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(path.to_lowercase().as_bytes());
    hex::encode(hasher.finalize())
}

/// One file's metadata, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PictureDocument {
    id: String,
    path: String,
    record: MetadataRecord,
}

impl PictureDocument {
    pub fn new(path: impl Into<String>, record: MetadataRecord) -> Self {
        let path = path.into();
        Self {
            id: document_id(&path),
            path,
            record,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn record(&self) -> &MetadataRecord {
        &self.record
    }

    /// Convert to a BSON document.
    ///
    /// `_id` and `path` come first. Metadata fields with those names are
    /// dropped so they cannot replace the generated values.
    #[must_use]
    pub fn to_bson(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(ID_FIELD, self.id.as_str());
        doc.insert(PATH_FIELD, self.path.as_str());

        for (field, value) in self.record.iter() {
            if field == ID_FIELD || field == PATH_FIELD {
                tracing::debug!("Ignoring metadata field '{}' in {}", field, self.path);
                continue;
            }
            doc.insert(field, to_bson_value(value));
        }
        doc
    }
}

fn to_bson_value(value: &MetadataValue) -> Bson {
    match value {
        MetadataValue::String(s) => Bson::String(s.clone()),
        MetadataValue::Integer(i) => Bson::Int64(*i),
        MetadataValue::Decimal(d) => Bson::Double(*d),
        MetadataValue::Timestamp(t) => {
            Bson::DateTime(bson::DateTime::from_millis(t.timestamp_millis()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::normalize;

    #[test]
    fn test_document_id_is_sha1_of_lowercased_path() {
        // sha1("abc")
        assert_eq!(document_id("ABC"), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(document_id("/Photos/DSC00001.ARW"), document_id("/photos/dsc00001.arw"));
        assert_ne!(document_id("/photos/a.ARW"), document_id("/photos/b.ARW"));
    }

    #[test]
    fn test_new_sets_generated_fields() {
        let doc = PictureDocument::new("/photos/a.ARW", MetadataRecord::default());
        assert_eq!(doc.path(), "/photos/a.ARW");
        assert_eq!(doc.id(), document_id("/photos/a.ARW"));
        assert!(doc.record().is_empty());
    }

    #[test]
    fn test_to_bson_types() {
        let record = normalize(
            "Image Width : 1920\n\
             Aperture : 2.8\n\
             Create Date : 2023:05:01 10:15:30.123456+02:00\n\
             Camera Model Name : ILCE-7M3\n",
        )
        .unwrap();
        let doc = PictureDocument::new("/photos/a.ARW", record).to_bson();

        assert_eq!(doc.get_str("_id").unwrap(), document_id("/photos/a.ARW"));
        assert_eq!(doc.get_str("path").unwrap(), "/photos/a.ARW");
        assert_eq!(doc.get_i64("image_width").unwrap(), 1920);
        assert_eq!(doc.get_f64("aperture").unwrap(), 2.8);
        assert_eq!(doc.get_str("camera_model_name").unwrap(), "ILCE-7M3");

        // 2023-05-01T08:15:30.123Z
        let created = doc.get_datetime("create_date").unwrap();
        assert_eq!(created.timestamp_millis(), 1_682_928_930_123);
    }

    #[test]
    fn test_metadata_cannot_override_generated_fields() {
        let record = normalize("Path : /elsewhere\n_id : forged\nFile Name : a.ARW\n").unwrap();
        let doc = PictureDocument::new("/photos/a.ARW", record).to_bson();

        assert_eq!(doc.get_str("path").unwrap(), "/photos/a.ARW");
        assert_eq!(doc.get_str("_id").unwrap(), document_id("/photos/a.ARW"));
        assert_eq!(doc.get_str("file_name").unwrap(), "a.ARW");
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_generated_fields_come_first() {
        let record = normalize("Aperture : 4.0\n").unwrap();
        let doc = PictureDocument::new("/a.ARW", record).to_bson();
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["_id", "path", "aperture"]);
    }
}
