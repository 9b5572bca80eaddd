//! Typed metadata values and records.

use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::fmt;

/// A single exiftool value after coercion.
///
/// The variant is decided by the field classification tables, never by
/// looking at the text itself: `"1920"` in a text field stays a string.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    /// Trimmed text for unclassified fields.
    String(String),
    /// Value of an integer field.
    Integer(i64),
    /// Value of a decimal field.
    Decimal(f64),
    /// Value of a datetime field. Values parsed without an offset carry UTC.
    Timestamp(DateTime<FixedOffset>),
}

impl MetadataValue {
    /// The text form, if this value was left untyped.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_decimal(&self) -> Option<f64> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    /// Short name of the variant, used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

/// The normalized metadata of one file.
///
/// Keys are normalized field names and appear once each. Ordering is by key
/// so documents built from a record have a stable field layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    fields: BTreeMap<String, MetadataValue>,
}

impl MetadataRecord {
    pub(crate) const fn from_fields(fields: BTreeMap<String, MetadataValue>) -> Self {
        Self {
            fields,
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&MetadataValue> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, MetadataValue> {
        self.fields
    }
}

impl IntoIterator for MetadataRecord {
    type Item = (String, MetadataValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, MetadataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
