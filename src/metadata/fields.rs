//! Field classification tables for exiftool output.
//!
//! exiftool prints every value as text. Downstream consumers of the uploaded
//! documents expect a fixed set of fields to carry real types, so each
//! normalized field name is looked up in three static tables:
//!
//! - [`DATETIME_FIELDS`] - timestamp fields with their accepted formats
//! - [`INTEGER_FIELDS`] - base-10 integer fields
//! - [`DECIMAL_FIELDS`] - floating point fields
//!
//! The tables are part of the document contract and must not drift. A field
//! belongs to at most one table.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Most digits accepted after the seconds' decimal point.
pub const MAX_FRACTION_DIGITS: usize = 6;

/// A timestamp layout accepted for a datetime field.
///
/// Layouts use chrono's `strftime` syntax. A layout containing `%.f` requires
/// a `.` followed by 1 to [`MAX_FRACTION_DIGITS`] digits after the seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// Layout that ends in a UTC offset (`+02:00` or `+0200`).
    Zoned(&'static str),
    /// Layout without an offset. Parsed values are taken as UTC.
    Naive(&'static str),
}

impl TimestampFormat {
    /// The chrono layout string.
    #[must_use]
    pub const fn layout(&self) -> &'static str {
        match self {
            Self::Zoned(layout) | Self::Naive(layout) => *layout,
        }
    }

    /// Whether values must carry fractional seconds.
    #[must_use]
    pub fn requires_fraction(&self) -> bool {
        self.layout().contains("%.f")
    }

    /// Parse `value` with this layout, returning `None` when it does not match.
    ///
    /// The whole string must be consumed; trailing input is a mismatch.
    #[must_use]
    pub fn parse(&self, value: &str) -> Option<DateTime<FixedOffset>> {
        // chrono's %.f also takes no fraction at all, or up to nine digits
        if self.requires_fraction() && !has_fraction(value) {
            return None;
        }

        match self {
            Self::Zoned(layout) => DateTime::parse_from_str(value, layout).ok(),
            Self::Naive(layout) => NaiveDateTime::parse_from_str(value, layout)
                .ok()
                .map(|naive| naive.and_utc().fixed_offset()),
        }
    }
}

/// A `.` followed by 1 to [`MAX_FRACTION_DIGITS`] digits.
fn has_fraction(value: &str) -> bool {
    let Some((_, rest)) = value.split_once('.') else {
        return false;
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    (1..=MAX_FRACTION_DIGITS).contains(&digits)
}

/// `YYYY:MM:DD HH:MM:SS±ZZZZ`, used by the filesystem timestamps.
pub const FILE_DATE_FORMAT: TimestampFormat = TimestampFormat::Zoned("%Y:%m:%d %H:%M:%S%z");

/// `YYYY:MM:DD HH:MM:SS.ffffff±ZZZZ`, used by capture timestamps.
pub const ORIGINAL_DATE_FORMAT: TimestampFormat =
    TimestampFormat::Zoned("%Y:%m:%d %H:%M:%S%.f%z");

/// `YYYY:MM:DD HH:MM:SS.ffffff`, capture timestamps from bodies that do not record an offset.
pub const ORIGINAL_DATE_FORMAT_NO_ZONE: TimestampFormat =
    TimestampFormat::Naive("%Y:%m:%d %H:%M:%S%.f");

const FILE_DATE_FORMATS: &[TimestampFormat] = &[FILE_DATE_FORMAT];
const ORIGINAL_DATE_FORMATS: &[TimestampFormat] =
    &[ORIGINAL_DATE_FORMAT, ORIGINAL_DATE_FORMAT_NO_ZONE];

/// Datetime fields and their formats, tried in declared order.
pub static DATETIME_FIELDS: &[(&str, &[TimestampFormat])] = &[
    ("file_modification_date/time", FILE_DATE_FORMATS),
    ("file_access_date/time", FILE_DATE_FORMATS),
    ("file_inode_change_date/time", FILE_DATE_FORMATS),
    ("date/time_original", ORIGINAL_DATE_FORMATS),
    ("create_date", ORIGINAL_DATE_FORMATS),
    ("modify_date", ORIGINAL_DATE_FORMATS),
];

/// Fields stored as integers.
pub static INTEGER_FIELDS: &[&str] = &[
    "image_width",
    "image_height",
    "iso",
    "shutter_count",
    "jpg_from_raw_start",
    "jpg_from_raw_length",
    "thumbnail_offset",
    "thumbnail_length",
    "sr2_sub_ifd_offset",
    "sr2_sub_ifd_length",
    "exif_image_width",
    "exif_image_height",
    "shutter_count_2",
    "sony_iso",
    "iso_auto_min",
    "iso_auto_max",
    "bits_per_sample",
    "strip_byte_counts",
    "rows_per_strip",
    "strip_offsets",
    "x_resolution",
    "y_resolution",
    "samples_per_pixel",
    "sequence_file_number",
    "digital_zoom_ratio",
    "sequence_image_number",
    "focus_position_2",
];

/// Fields stored as floating point decimals.
pub static DECIMAL_FIELDS: &[&str] = &[
    "aperture",
    "megapixels",
    "light_value",
    "blue_balance",
    "sony_f_number",
    "sony_max_aperture_value",
    "sony_f_number_2",
    "f_number",
    "max_aperture_value",
    "brightness_value",
    "stops_above_base_iso",
];

/// How a normalized field is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Parsed with the listed formats.
    Timestamp(&'static [TimestampFormat]),
    /// Parsed as a base-10 integer.
    Integer,
    /// Parsed as a floating point decimal.
    Decimal,
    /// Kept as trimmed text.
    Text,
}

/// Look up how `field` (already normalized) is stored.
#[must_use]
pub fn classify(field: &str) -> FieldKind {
    if let Some((_, formats)) = DATETIME_FIELDS.iter().find(|(name, _)| *name == field) {
        FieldKind::Timestamp(*formats)
    } else if INTEGER_FIELDS.iter().any(|name| *name == field) {
        FieldKind::Integer
    } else if DECIMAL_FIELDS.iter().any(|name| *name == field) {
        FieldKind::Decimal
    } else {
        FieldKind::Text
    }
}
