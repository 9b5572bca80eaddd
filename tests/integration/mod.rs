//! Integration test suite for exif-database
//!
//! End-to-end tests of the upload pipeline against in-memory stand-ins for
//! exiftool and MongoDB, plus tests of the compiled binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **pipeline**: scan, cache, normalization and insert behavior of a run
//! - **cli**: argument handling, exit codes and error rendering of the binary

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod pipeline;
