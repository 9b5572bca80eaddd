//! Core types for exif-database
//!
//! The core module holds the error types shared by every other module:
//! - [`ExifDatabaseError`] - enumerated failure modes of an upload run
//! - [`ErrorContext`] - user-friendly wrapper with details and suggestions
//! - [`user_friendly_error`] - converts any error into an [`ErrorContext`]
//!
//! # Error Handling Pattern
//!
//! ```rust
//! use exif_database::core::{ExifDatabaseError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn scan() -> Result<()> {
//!     Err(ExifDatabaseError::RootNotFound { path: "/photos".to_string() }.into())
//! }
//!
//! if let Err(e) = scan() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.suggestion.is_some());
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, ExifDatabaseError, user_friendly_error};
