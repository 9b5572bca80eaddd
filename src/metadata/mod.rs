//! Normalization of exiftool output into typed metadata.
//!
//! exiftool prints one `Label : Value` pair per line. This module turns that
//! text into a [`MetadataRecord`]: labels become lowercase, underscore-joined
//! field names and values are coerced to [`MetadataValue`] variants according
//! to the static classification tables in [`fields`].
//!
//! # Example
//!
//! ```rust
//! use exif_database::metadata::{normalize, MetadataValue};
//!
//! let raw = "\
//! Image Width                     : 1920
//! Aperture                        : 2.8
//! Create Date                     : 2023:05:01 10:15:30.123456+02:00
//! Camera Model Name               : ILCE-7M3
//! ";
//!
//! let record = normalize(raw)?;
//! assert_eq!(record.get("image_width"), Some(&MetadataValue::Integer(1920)));
//! assert_eq!(record.get("aperture"), Some(&MetadataValue::Decimal(2.8)));
//! assert!(record.get("create_date").and_then(|v| v.as_timestamp()).is_some());
//! # Ok::<(), exif_database::metadata::MetadataError>(())
//! ```
//!
//! # Failure Semantics
//!
//! A value that does not fit its field's type aborts the whole record with a
//! [`MetadataError`] naming the field and the raw value. Callers never see a
//! partially coerced record.

mod error;
pub mod fields;
mod normalizer;
mod value;

pub use error::MetadataError;
pub use fields::{FieldKind, TimestampFormat, classify};
pub use normalizer::{normalize, normalize_key};
pub use value::{MetadataRecord, MetadataValue};
