//! exif-database - bulk upload of exiftool metadata into MongoDB
//!
//! Recursively scans a directory for raw photo files (`.ARW` by default), runs
//! `exiftool` on every file not uploaded before, normalizes the `Label : Value`
//! output into typed fields, and inserts one document per file into the
//! `exif_database.pictures` collection.
//!
//! # Architecture Overview
//!
//! A run is a single sequential pipeline:
//!
//! ```text
//! scanner ──> exiftool ──> metadata ──> document ──> store
//!    │                                                 │
//!    └──────────────── cache (processed paths) <───────┘
//! ```
//!
//! 1. [`cache`] loads the set of paths uploaded by earlier runs
//! 2. [`scanner`] lists the files under the root directory
//! 3. [`exiftool`] extracts raw metadata text for each new file
//! 4. [`metadata`] coerces it into typed values using static field tables
//! 5. [`document`] adds the `_id` and `path` fields
//! 6. [`store`] inserts the whole batch, then the cache is saved
//!
//! [`uploader`] drives these steps; [`cli`] wires it to settings from
//! [`config`].
//!
//! # Core Modules
//!
//! ## Pipeline
//! - [`uploader`] - one upload run, end to end
//! - [`scanner`] - recursive file discovery
//! - [`exiftool`] - external process runner and the [`exiftool::MetadataSource`] seam
//! - [`metadata`] - normalization of exiftool text into typed records
//! - [`document`] - database documents and identifiers
//! - [`store`] - the [`store::DocumentStore`] seam and its MongoDB implementation
//! - [`cache`] - the processed-set cache file
//!
//! ## Supporting Modules
//! - [`cli`] - command-line entry point and logging setup
//! - [`config`] - layered settings and user-scoped file locations
//! - [`core`] - error types and user-facing error rendering
//! - [`utils`] - atomic file writes and progress display
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/exif-database/config.toml (every key optional)
//! [mongo]
//! uri = "mongodb://localhost:27017"
//!
//! [exiftool]
//! timeout_secs = 60
//! ```
//!
//! `MONGO_URI`, `EXIF_DATABASE_CACHE` and `EXIFTOOL_PATH` override the file.

// Pipeline
pub mod cache;
pub mod document;
pub mod exiftool;
pub mod metadata;
pub mod scanner;
pub mod store;
pub mod uploader;

// Supporting
pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

// Test utilities (available for both unit and integration tests)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
