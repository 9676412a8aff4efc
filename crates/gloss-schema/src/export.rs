//! Metadata-aware export.
//!
//! An exported document lists every field in declaration order, with absent
//! values rendered as `null`, followed by one `<field>$meta` entry per
//! annotated field.

use std::fmt;

use gloss_core::{FieldValue, Record};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AnnotationError;
use crate::instance::AnnotatedInstance;
use crate::synth::meta_key;

/// Timestamp rendering: ISO-8601 without zone, fractional seconds only when
/// non-zero.
const ISO_8601: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Ordered field name -> value mapping with metadata siblings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExportedDocument {
    entries: Map<String, Value>,
}

impl ExportedDocument {
    /// Rendered value of `field`. `Some(Value::Null)` for absent values.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.entries.get(field)
    }

    /// The `<field>$meta` entry for `field`.
    #[must_use]
    pub fn meta(&self, field: &str) -> Option<&Value> {
        self.entries.get(&meta_key(field))
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }

    /// # Errors
    ///
    /// Returns `AnnotationError::Json` if serialization fails.
    pub fn to_json_string(&self) -> Result<String, AnnotationError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// # Errors
    ///
    /// Returns `AnnotationError::Json` if serialization fails.
    pub fn to_json_string_pretty(&self) -> Result<String, AnnotationError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

impl fmt::Display for ExportedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string_pretty(&self.entries).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// Export an annotated instance.
///
/// Reads every field through its forwarding accessor; the instance is never
/// modified.
///
/// # Errors
///
/// Returns `AnnotationError::Serialization` naming the field if a value has
/// no document representation (non-finite reals).
pub fn export<R: Record>(instance: &AnnotatedInstance<R>) -> Result<ExportedDocument, AnnotationError> {
    let ty = instance.annotated_type();
    let mut entries = Map::with_capacity(ty.accessors().len() * 2);

    for accessor in ty.accessors() {
        let value = render(accessor.name(), accessor.read(instance.record()))?;
        entries.insert(accessor.name().to_string(), value);
    }

    for accessor in ty.accessors() {
        entries.insert(
            meta_key(accessor.name()),
            serde_json::to_value(accessor.meta())?,
        );
    }

    tracing::debug!(type_name = ty.name(), entries = entries.len(), "exported instance");
    Ok(ExportedDocument { entries })
}

fn render(field: &str, value: Option<FieldValue>) -> Result<Value, AnnotationError> {
    let Some(value) = value else {
        return Ok(Value::Null);
    };

    match value {
        FieldValue::Int(v) => Ok(Value::from(v)),
        FieldValue::Real(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| AnnotationError::Serialization {
                field: field.to_string(),
                reason: format!("{v} has no JSON representation"),
            }),
        FieldValue::Text(v) => Ok(Value::String(v)),
        FieldValue::Timestamp(v) => Ok(Value::String(v.format(ISO_8601).to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_value_renders_null() {
        assert_eq!(render("Scheduled", None).unwrap(), Value::Null);
    }

    #[test]
    fn timestamp_renders_iso_8601() {
        let midnight = NaiveDate::from_ymd_opt(2020, 2, 29)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            render("Scheduled", Some(midnight.into())).unwrap(),
            Value::String("2020-02-29T00:00:00".into())
        );

        let with_millis = NaiveDate::from_ymd_opt(2020, 2, 29)
            .unwrap()
            .and_hms_milli_opt(8, 15, 0, 250)
            .unwrap();
        assert_eq!(
            render("Scheduled", Some(with_millis.into())).unwrap(),
            Value::String("2020-02-29T08:15:00.250".into())
        );
    }

    #[test]
    fn real_renders_as_float() {
        let value = render("HoursRemaining", Some(FieldValue::Real(240.0))).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), "240.0");
    }

    #[test]
    fn non_finite_real_is_a_serialization_error() {
        let err = render("HoursRemaining", Some(FieldValue::Real(f64::NAN))).unwrap_err();
        assert!(matches!(
            &err,
            AnnotationError::Serialization { field, .. } if field == "HoursRemaining"
        ));
    }
}
