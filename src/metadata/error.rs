//! Errors raised while normalizing exiftool output.

use thiserror::Error;

/// A failure to turn exiftool text into a typed record.
///
/// Every variant names the offending input so the caller can report exactly
/// which field of which file was rejected. Normalization stops at the first
/// error and no partial record is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    /// A non-empty line with no `:` separator.
    #[error("Malformed metadata line (no ':' separator): '{line}'")]
    MalformedLine {
        /// The raw line as printed by exiftool
        line: String,
    },

    /// No registered format matched a datetime field.
    #[error("Field '{field}' has invalid timestamp '{value}' (tried formats: {tried})")]
    InvalidTimestamp {
        /// Normalized field name
        field: String,
        /// Trimmed raw value
        value: String,
        /// Layouts attempted, in order
        tried: String,
    },

    /// An integer field did not hold a base-10 integer.
    #[error("Field '{field}' has invalid integer '{value}': {reason}")]
    InvalidInteger {
        /// Normalized field name
        field: String,
        /// Trimmed raw value
        value: String,
        /// Parser message
        reason: String,
    },

    /// A decimal field did not hold a floating point number.
    #[error("Field '{field}' has invalid decimal '{value}': {reason}")]
    InvalidDecimal {
        /// Normalized field name
        field: String,
        /// Trimmed raw value
        value: String,
        /// Parser message
        reason: String,
    },
}

impl MetadataError {
    /// The normalized field that failed coercion, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MalformedLine { .. } => None,
            Self::InvalidTimestamp { field, .. }
            | Self::InvalidInteger { field, .. }
            | Self::InvalidDecimal { field, .. } => Some(field),
        }
    }

    /// The raw value (or line) that was rejected.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::MalformedLine { line } => line,
            Self::InvalidTimestamp { value, .. }
            | Self::InvalidInteger { value, .. }
            | Self::InvalidDecimal { value, .. } => value,
        }
    }
}
