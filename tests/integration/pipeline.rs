//! Upload runs against in-memory stand-ins.

use exif_database::cache::ProcessedCache;
use exif_database::core::ExifDatabaseError;
use exif_database::document::document_id;
use exif_database::metadata::MetadataValue;
use exif_database::test_utils::{
    MemoryStore, SAMPLE_OUTPUT, StaticMetadataSource, init_test_logging,
};
use exif_database::uploader::{UploadSummary, Uploader};

use crate::common::{PhotoLibrary, path_key};

#[tokio::test]
async fn test_full_run_produces_typed_documents() {
    init_test_logging(None);
    let library = PhotoLibrary::new().unwrap();
    let photo = library.add_photo("2023/05/DSC00001.ARW").unwrap();

    let source = StaticMetadataSource::new().with_output(&photo, SAMPLE_OUTPUT);
    let uploader = Uploader::new(source, MemoryStore::new(), library.cache_path());
    uploader.run(&library.root(), "ARW").await.unwrap();

    let docs = uploader.store().documents();
    assert_eq!(docs.len(), 1);
    let doc = &docs[0];
    assert_eq!(doc.path(), path_key(&photo));
    assert_eq!(doc.id(), document_id(&path_key(&photo)));

    let record = doc.record();
    assert_eq!(record.get("image_width"), Some(&MetadataValue::Integer(6000)));
    assert_eq!(record.get("iso"), Some(&MetadataValue::Integer(100)));
    assert_eq!(record.get("f_number"), Some(&MetadataValue::Decimal(2.8)));
    assert_eq!(record.get("make"), Some(&MetadataValue::String("SONY".to_string())));
    assert_eq!(
        record.get("exposure_time"),
        Some(&MetadataValue::String("1/250".to_string()))
    );

    let created = record.get("create_date").and_then(MetadataValue::as_timestamp).unwrap();
    assert_eq!(created.to_rfc3339(), "2023-05-01T10:15:30.123456+02:00");

    // No offset recorded by the camera
    let original = record.get("date/time_original").and_then(MetadataValue::as_timestamp).unwrap();
    assert_eq!(original.to_rfc3339(), "2023-05-01T10:15:30.250+00:00");

    let bson = doc.to_bson();
    assert_eq!(bson.get_i64("image_width").unwrap(), 6000);
    assert!(bson.get_datetime("file_modification_date/time").is_ok());
}

#[tokio::test]
async fn test_cache_prevents_second_upload() {
    let library = PhotoLibrary::new().unwrap();
    let first = library.add_photo("a.ARW").unwrap();

    let source = StaticMetadataSource::new().with_output(&first, SAMPLE_OUTPUT);
    let uploader = Uploader::new(source, MemoryStore::new(), library.cache_path());
    uploader.run(&library.root(), "ARW").await.unwrap();

    // A new file appears between runs
    let second = library.add_photo("b.ARW").unwrap();
    let source = StaticMetadataSource::new()
        .with_output(&first, SAMPLE_OUTPUT)
        .with_output(&second, SAMPLE_OUTPUT);
    let uploader = Uploader::new(source, MemoryStore::new(), library.cache_path());

    let summary = uploader.run(&library.root(), "ARW").await.unwrap();
    assert_eq!(
        summary,
        UploadSummary {
            scanned: 2,
            skipped: 1,
            uploaded: 1,
        }
    );
    assert_eq!(uploader.source().calls(), vec![second.clone()]);

    let docs = uploader.store().documents();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].path(), path_key(&second));

    let cache = ProcessedCache::load(&library.cache_path()).unwrap();
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn test_cache_file_format() {
    let library = PhotoLibrary::new().unwrap();
    let photo = library.add_photo("a.ARW").unwrap();

    let source = StaticMetadataSource::new().with_output(&photo, SAMPLE_OUTPUT);
    let uploader = Uploader::new(source, MemoryStore::new(), library.cache_path());
    uploader.run(&library.root(), "ARW").await.unwrap();

    let content = std::fs::read_to_string(library.cache_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json[path_key(&photo)], serde_json::Value::Bool(true));
}

#[tokio::test]
async fn test_externally_written_cache_is_honored() {
    let library = PhotoLibrary::new().unwrap();
    let photo = library.add_photo("a.ARW").unwrap();

    std::fs::create_dir_all(library.cache_path().parent().unwrap()).unwrap();
    let content = serde_json::json!({ path_key(&photo): true }).to_string();
    std::fs::write(library.cache_path(), content).unwrap();

    let uploader =
        Uploader::new(StaticMetadataSource::new(), MemoryStore::new(), library.cache_path());
    let summary = uploader.run(&library.root(), "ARW").await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert!(uploader.source().calls().is_empty());
    assert_eq!(uploader.store().insert_calls(), 0);
}

#[tokio::test]
async fn test_lowercase_extension_is_ignored() {
    let library = PhotoLibrary::new().unwrap();
    library.add_photo("a.arw").unwrap();
    library.add_photo("b.JPG").unwrap();

    let uploader =
        Uploader::new(StaticMetadataSource::new(), MemoryStore::new(), library.cache_path());
    let summary = uploader.run(&library.root(), "ARW").await.unwrap();

    assert_eq!(summary.scanned, 0);
    assert!(uploader.source().calls().is_empty());
}

#[tokio::test]
async fn test_invalid_value_aborts_whole_run() {
    let library = PhotoLibrary::new().unwrap();
    let good = library.add_photo("a.ARW").unwrap();
    let bad = library.add_photo("b.ARW").unwrap();

    let source = StaticMetadataSource::new()
        .with_output(&good, SAMPLE_OUTPUT)
        .with_output(&bad, "X Resolution : 72.5\n");
    let uploader = Uploader::new(source, MemoryStore::new(), library.cache_path());

    let err = uploader.run(&library.root(), "ARW").await.unwrap_err();
    let Some(ExifDatabaseError::Metadata {
        path,
        source,
    }) = err.downcast_ref::<ExifDatabaseError>()
    else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(path, &path_key(&bad));
    assert_eq!(source.field(), Some("x_resolution"));
    assert_eq!(source.value(), "72.5");

    assert_eq!(uploader.store().insert_calls(), 0);
    assert!(!library.cache_path().exists());
}

#[tokio::test]
async fn test_corrupt_cache_is_reported() {
    let library = PhotoLibrary::new().unwrap();
    library.add_photo("a.ARW").unwrap();
    std::fs::create_dir_all(library.cache_path().parent().unwrap()).unwrap();
    std::fs::write(library.cache_path(), "{ not json").unwrap();

    let uploader =
        Uploader::new(StaticMetadataSource::new(), MemoryStore::new(), library.cache_path());
    let err = uploader.run(&library.root(), "ARW").await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ExifDatabaseError>(),
        Some(ExifDatabaseError::CacheParseError { .. })
    ));
    // The corrupt file is left for the operator to inspect
    assert_eq!(std::fs::read_to_string(library.cache_path()).unwrap(), "{ not json");
}

#[tokio::test]
async fn test_duplicate_identifier_fails_insert() {
    let library = PhotoLibrary::new().unwrap();
    let photo = library.add_photo("a.ARW").unwrap();

    let store = MemoryStore::new();
    let source = StaticMetadataSource::new().with_output(&photo, SAMPLE_OUTPUT);
    let uploader = Uploader::new(source, store, library.cache_path());
    uploader.run(&library.root(), "ARW").await.unwrap();

    // Lose the cache: the same path is collected again and collides
    std::fs::remove_file(library.cache_path()).unwrap();
    let err = uploader.run(&library.root(), "ARW").await.unwrap_err();

    assert!(err.to_string().contains("duplicate key"));
    assert!(!library.cache_path().exists());
    assert_eq!(uploader.store().documents().len(), 1);
}
