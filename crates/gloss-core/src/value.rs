//! Dynamic field values and their semantic types.
//!
//! Records expose their fields through `FieldValue` so that accessor tables
//! can be built from data instead of from generated code. Absence is always
//! modelled as `Option::None`, never as a variant.

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ValueType
// ---------------------------------------------------------------------------

/// Semantic type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Int,
    Real,
    Text,
    Timestamp,
}

impl ValueType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Real => "real",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A present field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Real(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl FieldValue {
    /// Semantic type of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Int(_) => ValueType::Int,
            Self::Real(_) => ValueType::Real,
            Self::Text(_) => ValueType::Text,
            Self::Timestamp(_) => ValueType::Timestamp,
        }
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

// ---------------------------------------------------------------------------
// FromFieldValue
// ---------------------------------------------------------------------------

/// Conversion from a dynamic `FieldValue` into a concrete Rust field type.
///
/// `field` is only used to name the field in errors.
pub trait FromFieldValue: Sized {
    /// Semantic type this Rust type is stored as.
    const VALUE_TYPE: ValueType;

    /// Convert `value`, failing when its semantic type differs.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::TypeMismatch` for a value of another semantic type,
    /// or `CoreError::OutOfRange` when an integer does not fit.
    fn from_field_value(field: &str, value: FieldValue) -> Result<Self, CoreError>;
}

fn mismatch(field: &str, expected: ValueType, value: &FieldValue) -> CoreError {
    CoreError::TypeMismatch {
        field: field.to_string(),
        expected,
        found: value.value_type(),
    }
}

impl FromFieldValue for i64 {
    const VALUE_TYPE: ValueType = ValueType::Int;

    fn from_field_value(field: &str, value: FieldValue) -> Result<Self, CoreError> {
        match value {
            FieldValue::Int(v) => Ok(v),
            other => Err(mismatch(field, Self::VALUE_TYPE, &other)),
        }
    }
}

impl FromFieldValue for i32 {
    const VALUE_TYPE: ValueType = ValueType::Int;

    fn from_field_value(field: &str, value: FieldValue) -> Result<Self, CoreError> {
        let wide = i64::from_field_value(field, value)?;
        Self::try_from(wide).map_err(|_| CoreError::OutOfRange {
            field: field.to_string(),
            value: wide,
        })
    }
}

impl FromFieldValue for f64 {
    const VALUE_TYPE: ValueType = ValueType::Real;

    fn from_field_value(field: &str, value: FieldValue) -> Result<Self, CoreError> {
        match value {
            FieldValue::Real(v) => Ok(v),
            other => Err(mismatch(field, Self::VALUE_TYPE, &other)),
        }
    }
}

impl FromFieldValue for String {
    const VALUE_TYPE: ValueType = ValueType::Text;

    fn from_field_value(field: &str, value: FieldValue) -> Result<Self, CoreError> {
        match value {
            FieldValue::Text(v) => Ok(v),
            other => Err(mismatch(field, Self::VALUE_TYPE, &other)),
        }
    }
}

impl FromFieldValue for NaiveDateTime {
    const VALUE_TYPE: ValueType = ValueType::Timestamp;

    fn from_field_value(field: &str, value: FieldValue) -> Result<Self, CoreError> {
        match value {
            FieldValue::Timestamp(v) => Ok(v),
            other => Err(mismatch(field, Self::VALUE_TYPE, &other)),
        }
    }
}

/// Convert a value written to a non-optional field.
///
/// # Errors
///
/// Returns `CoreError::Required` for `None`, otherwise any conversion error.
pub fn required<T: FromFieldValue>(field: &str, value: Option<FieldValue>) -> Result<T, CoreError> {
    let value = value.ok_or_else(|| CoreError::Required {
        field: field.to_string(),
    })?;
    T::from_field_value(field, value)
}

/// Convert a value written to an optional field. `None` stays `None`.
///
/// # Errors
///
/// Returns any conversion error for a present value.
pub fn optional<T: FromFieldValue>(
    field: &str,
    value: Option<FieldValue>,
) -> Result<Option<T>, CoreError> {
    value.map(|v| T::from_field_value(field, v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn value_type_display_is_snake_case() {
        assert_eq!(ValueType::Timestamp.to_string(), "timestamp");
        assert_eq!(
            serde_json::to_string(&ValueType::Real).unwrap(),
            r#""real""#
        );
    }

    #[test]
    fn i32_rejects_out_of_range() {
        let err = i32::from_field_value("ID", FieldValue::Int(i64::MAX)).unwrap_err();
        assert_eq!(
            err,
            CoreError::OutOfRange {
                field: "ID".into(),
                value: i64::MAX
            }
        );
    }

    #[test]
    fn mismatch_names_both_types() {
        let err = String::from_field_value("Comment", FieldValue::Int(3)).unwrap_err();
        assert_eq!(
            err,
            CoreError::TypeMismatch {
                field: "Comment".into(),
                expected: ValueType::Text,
                found: ValueType::Int,
            }
        );
    }

    #[test]
    fn required_rejects_absence() {
        let err = required::<i32>("Type", None).unwrap_err();
        assert!(matches!(err, CoreError::Required { field } if field == "Type"));
    }

    #[test]
    fn optional_passes_absence_through() {
        assert_eq!(optional::<NaiveDateTime>("Entered", None).unwrap(), None);
        let ts = NaiveDate::from_ymd_opt(2020, 2, 19)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            optional::<NaiveDateTime>("Entered", Some(ts.into())).unwrap(),
            Some(ts)
        );
    }
}
