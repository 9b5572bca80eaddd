//! Turns exiftool text output into a typed [`MetadataRecord`].

use std::collections::BTreeMap;

use super::error::MetadataError;
use super::fields::{DATETIME_FIELDS, DECIMAL_FIELDS, INTEGER_FIELDS, TimestampFormat};
use super::value::{MetadataRecord, MetadataValue};

/// Normalize an exiftool label into a field name.
///
/// The label is trimmed, lowercased and every space becomes `_`. Slashes and
/// other punctuation are kept, so `File Modification Date/Time` becomes
/// `file_modification_date/time`.
#[must_use]
pub fn normalize_key(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}

/// Parse exiftool output into a typed record.
///
/// Each non-empty line is split on its first `:`; everything after it,
/// trimmed, is the value (values such as timestamps contain colons
/// themselves). Fields listed in the classification tables are then coerced,
/// datetime fields first, then integers, then decimals. Other fields stay
/// trimmed strings.
///
/// # Errors
///
/// Returns the first [`MetadataError`] hit. No partial record is returned.
///
/// # Examples
///
/// ```rust
/// use exif_database::metadata::{normalize, MetadataValue};
///
/// let record = normalize("Image Width : 1920\nCamera Model Name : ILCE-7M3\n").unwrap();
/// assert_eq!(record.get("image_width"), Some(&MetadataValue::Integer(1920)));
/// assert_eq!(record.get("camera_model_name").and_then(|v| v.as_str()), Some("ILCE-7M3"));
/// ```
pub fn normalize(raw: &str) -> Result<MetadataRecord, MetadataError> {
    let mut fields = BTreeMap::new();

    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let (label, value) = line.split_once(':').ok_or_else(|| MetadataError::MalformedLine {
            line: line.to_string(),
        })?;

        fields.insert(normalize_key(label), MetadataValue::String(value.trim().to_string()));
    }

    for (field, formats) in DATETIME_FIELDS {
        coerce_field(&mut fields, field, |raw| parse_timestamp(field, raw, formats))?;
    }
    for field in INTEGER_FIELDS {
        coerce_field(&mut fields, field, |raw| parse_integer(field, raw))?;
    }
    for field in DECIMAL_FIELDS {
        coerce_field(&mut fields, field, |raw| parse_decimal(field, raw))?;
    }

    Ok(MetadataRecord::from_fields(fields))
}

/// Replace the string value of `field`, when present, with its coerced form.
fn coerce_field<F>(
    fields: &mut BTreeMap<String, MetadataValue>,
    field: &str,
    convert: F,
) -> Result<(), MetadataError>
where
    F: FnOnce(&str) -> Result<MetadataValue, MetadataError>,
{
    if let Some(slot) = fields.get_mut(field) {
        if let MetadataValue::String(raw) = &*slot {
            let coerced = convert(raw)?;
            tracing::trace!("Coerced {} to {}", field, coerced.kind());
            *slot = coerced;
        }
    }
    Ok(())
}

fn parse_timestamp(
    field: &str,
    raw: &str,
    formats: &[TimestampFormat],
) -> Result<MetadataValue, MetadataError> {
    formats
        .iter()
        .find_map(|format| format.parse(raw))
        .map(MetadataValue::Timestamp)
        .ok_or_else(|| MetadataError::InvalidTimestamp {
            field: field.to_string(),
            value: raw.to_string(),
            tried: formats.iter().map(TimestampFormat::layout).collect::<Vec<_>>().join(", "),
        })
}

fn parse_integer(field: &str, raw: &str) -> Result<MetadataValue, MetadataError> {
    raw.parse::<i64>().map(MetadataValue::Integer).map_err(|e| MetadataError::InvalidInteger {
        field: field.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_decimal(field: &str, raw: &str) -> Result<MetadataValue, MetadataError> {
    raw.parse::<f64>().map(MetadataValue::Decimal).map_err(|e| MetadataError::InvalidDecimal {
        field: field.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
