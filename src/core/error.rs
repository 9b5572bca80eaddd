//! Error handling for exif-database
//!
//! This module provides the strongly-typed error enum used across the crate and
//! the user-facing rendering of failures. The design follows two rules:
//! 1. **Typed errors** for every failure the upload run can hit
//! 2. **User-friendly messages** with a suggestion for the operator
//!
//! # Architecture
//!
//! - [`ExifDatabaseError`] - every failure mode of a run
//! - [`ErrorContext`] - wrapper adding details and a suggestion
//! - [`user_friendly_error`] - converts any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! Every error is fatal: the run aborts, nothing is inserted and the
//! processed-set cache is left as it was, so the run can simply be repeated.
//!
//! # Examples
//!
//! ```rust,no_run
//! use exif_database::core::{ExifDatabaseError, user_friendly_error};
//!
//! let error = ExifDatabaseError::ExifToolNotFound {
//!     program: "exiftool".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::metadata::MetadataError;

/// The main error type for exif-database operations
///
/// # Error Categories
///
/// ## Extraction
/// - [`ExtractionFailed`] - exiftool exited with a non-zero status
/// - [`ExifToolNotFound`] - exiftool is not installed or not on PATH
///
/// ## Normalization
/// - [`Metadata`] - a field value did not match its classified type
///
/// ## Storage
/// - [`DatabaseError`] - the MongoDB driver rejected an operation
/// - [`CacheParseError`] - the processed-set cache is not valid JSON
///
/// ## Environment
/// - [`RootNotFound`] - the scan root does not exist
/// - [`ConfigError`] - settings are missing or invalid
/// - [`FileSystemError`] - a filesystem operation failed
///
/// [`ExtractionFailed`]: ExifDatabaseError::ExtractionFailed
/// [`ExifToolNotFound`]: ExifDatabaseError::ExifToolNotFound
/// [`Metadata`]: ExifDatabaseError::Metadata
/// [`DatabaseError`]: ExifDatabaseError::DatabaseError
/// [`CacheParseError`]: ExifDatabaseError::CacheParseError
/// [`RootNotFound`]: ExifDatabaseError::RootNotFound
/// [`ConfigError`]: ExifDatabaseError::ConfigError
/// [`FileSystemError`]: ExifDatabaseError::FileSystemError
#[derive(Error, Debug, Clone)]
pub enum ExifDatabaseError {
    /// exiftool returned a non-zero exit code for a file
    ///
    /// # Fields
    /// - `path`: The file exiftool was run on
    /// - `stderr`: The error text printed by exiftool
    #[error("exiftool failed for {path}: {stderr}")]
    ExtractionFailed {
        /// The file exiftool was run on
        path: String,
        /// The error text printed by exiftool
        stderr: String,
    },

    /// exiftool executable not found
    #[error("exiftool is not installed or not found in PATH (looked for '{program}')")]
    ExifToolNotFound {
        /// The program name or path that was looked up
        program: String,
    },

    /// A metadata value did not fit its field type
    #[error("Invalid metadata in {path}")]
    Metadata {
        /// The file whose metadata was rejected
        path: String,
        /// The normalization failure, naming field and raw value
        #[source]
        source: MetadataError,
    },

    /// The directory to scan does not exist
    #[error("Directory not found: {path}")]
    RootNotFound {
        /// The path given on the command line
        path: String,
    },

    /// The processed-set cache could not be parsed
    #[error("Invalid processed-set cache in {file}")]
    CacheParseError {
        /// Path to the cache file
        file: String,
        /// Parser message
        reason: String,
    },

    /// MongoDB operation failed
    #[error("Database operation '{operation}' failed: {reason}")]
    DatabaseError {
        /// The operation that failed (e.g. "connect", "insert_many")
        operation: String,
        /// Driver message
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// File system operation failed
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation that failed (e.g. "read", "write")
        operation: String,
        /// The path involved
        path: String,
        /// Underlying error message
        reason: String,
    },

    /// Anything not covered above
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error with user-friendly details and a suggestion
///
/// Built by [`user_friendly_error`] in the CLI entry point and printed with
/// [`ErrorContext::display`].
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ExifDatabaseError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ExifDatabaseError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error, displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`]
///
/// Known [`ExifDatabaseError`] variants get tailored suggestions. Common
/// library errors (I/O, TOML, JSON) are mapped to the closest variant.
/// Anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(known) = error.downcast_ref::<ExifDatabaseError>() {
        return create_error_context(known.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(ExifDatabaseError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                    reason: io_error.to_string(),
                })
                .with_suggestion("Check file ownership and permissions of the scanned directory and the data directory")
                .with_details(error_chain(&error));
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(ExifDatabaseError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                    reason: io_error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(error_chain(&error));
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(ExifDatabaseError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of your config.toml. Verify quotes, brackets and section names");
    }

    ErrorContext::new(ExifDatabaseError::Other {
        message: error_chain(&error),
    })
}

/// Render an error and its causes as one message.
fn error_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Map each [`ExifDatabaseError`] variant to its suggestion and details
fn create_error_context(error: ExifDatabaseError) -> ErrorContext {
    match &error {
        ExifDatabaseError::ExtractionFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Run exiftool on the file manually to inspect the problem. The file may be truncated or unreadable")
            .with_details("Nothing was uploaded and the processed-set cache was not changed; the run can be repeated"),

        ExifDatabaseError::ExifToolNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Install exiftool (e.g. 'brew install exiftool', 'apt install libimage-exiftool-perl') or set EXIFTOOL_PATH")
            .with_details("exif-database runs exiftool once per file to read its metadata"),

        ExifDatabaseError::Metadata { source, .. } => {
            let details = match source.field() {
                Some(field) => format!(
                    "Field '{field}' has value '{}' which does not match its expected type",
                    source.value()
                ),
                None => source.to_string(),
            };
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Inspect the file with exiftool. Typed fields must hold values of their declared type")
        }

        ExifDatabaseError::RootNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass an existing directory containing raw photo files"),

        ExifDatabaseError::CacheParseError { file, reason } => {
            let suggestion = format!(
                "Fix or remove {file}. Removing it makes the next run re-upload every file"
            );
            let reason = reason.clone();
            ErrorContext::new(error).with_details(reason).with_suggestion(suggestion)
        }

        ExifDatabaseError::DatabaseError { reason, .. } => {
            let suggestion = if reason.contains("E11000") || reason.contains("duplicate key") {
                "A document with the same identifier already exists. Check the processed-set cache matches the collection"
            } else {
                "Check that MongoDB is reachable at MONGO_URI and that the credentials are valid"
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        ExifDatabaseError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Set MONGO_URI or add a [mongo] uri entry to config.toml"),

        ExifDatabaseError::FileSystemError { reason, .. } => {
            let reason = reason.clone();
            ErrorContext::new(error).with_details(reason)
        }

        ExifDatabaseError::Other { .. } => ErrorContext::new(error),
    }
}
