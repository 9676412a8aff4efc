//! Cross-cutting error types for Gloss.
//!
//! Errors raised while reading or writing record fields live in `CoreError`.
//! Catalog construction and lookup errors live in `CatalogError`. Annotation
//! errors are defined in `gloss-schema`, which wraps both.

use thiserror::Error;

use crate::value::ValueType;

/// Errors raised by record field access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The record type has no member with this name.
    #[error("Unknown field: {type_name}.{field}")]
    UnknownField { type_name: String, field: String },

    /// A value of the wrong semantic type was written to a field.
    #[error("Type mismatch for field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: ValueType,
        found: ValueType,
    },

    /// An integer value does not fit the field's storage width.
    #[error("Value {value} is out of range for field '{field}'")]
    OutOfRange { field: String, value: i64 },

    /// Absence was written to a field that cannot be absent.
    #[error("Field '{field}' cannot be absent")]
    Required { field: String },

    /// A write was attempted on a derived, read-only field.
    #[error("Field '{field}' is read-only")]
    ReadOnly { field: String },
}

/// Errors raised while building or querying a metadata catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No descriptor exists for the requested field.
    #[error("Missing metadata for field '{0}'")]
    MissingMetadata(String),

    /// Two descriptors share the same field name.
    #[error("Duplicate catalog entry for field '{0}'")]
    DuplicateField(String),

    /// Two descriptors share the same public identifier.
    #[error("Public id {public_id} is used by both '{first}' and '{second}'")]
    DuplicatePublicId {
        public_id: i64,
        first: String,
        second: String,
    },
}
