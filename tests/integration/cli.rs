//! Tests of the compiled binary.

use predicates::prelude::*;

use crate::common::PhotoLibrary;

#[test]
fn test_help_describes_root_argument() {
    let library = PhotoLibrary::new().unwrap();
    library
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("<ROOT>"))
        .stdout(predicate::str::contains("MongoDB"));
}

#[test]
fn test_version() {
    let library = PhotoLibrary::new().unwrap();
    library
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_root_argument() {
    let library = PhotoLibrary::new().unwrap();
    library.command().assert().failure().stderr(predicate::str::contains("<ROOT>"));
}

#[test]
fn test_nonexistent_root() {
    let library = PhotoLibrary::new().unwrap();
    library
        .command()
        .arg(library.root().join("missing"))
        .env("MONGO_URI", "mongodb://127.0.0.1:1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Directory not found"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_missing_mongo_uri() {
    let library = PhotoLibrary::new().unwrap();
    library
        .command()
        .arg(library.root())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("MONGO_URI"));
}

#[test]
fn test_empty_library_succeeds_and_writes_cache() {
    let library = PhotoLibrary::new().unwrap();
    library
        .command()
        .arg(library.root())
        .env("MONGO_URI", "mongodb://127.0.0.1:1")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 files found"));

    assert!(library.cache_path().exists());
}

#[test]
fn test_uri_from_config_file() {
    let library = PhotoLibrary::new().unwrap();
    library.write_config("[mongo]\nuri = \"mongodb://127.0.0.1:1\"\n").unwrap();

    library.command().arg(library.root()).assert().success();
}

#[test]
fn test_invalid_config_file() {
    let library = PhotoLibrary::new().unwrap();
    library.write_config("[mongo\nuri = ").unwrap();

    library
        .command()
        .arg(library.root())
        .env("MONGO_URI", "mongodb://127.0.0.1:1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_exiftool_is_reported() {
    let library = PhotoLibrary::new().unwrap();
    library.add_photo("DSC00001.ARW").unwrap();

    library
        .command()
        .arg(library.root())
        .env("MONGO_URI", "mongodb://127.0.0.1:1")
        .env("EXIFTOOL_PATH", "exif-database-test-no-such-exiftool")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Uploading"))
        .stderr(predicate::str::contains("exiftool is not installed"));

    assert!(!library.cache_path().exists());
}
