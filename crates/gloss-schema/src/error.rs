//! Annotation error types.

use gloss_core::{CatalogError, CoreError};
use thiserror::Error;

/// Errors from synthesis, export, and packaging.
///
/// Synthesis errors always name the offending field. No partial annotated
/// type is ever returned alongside one.
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// An exposed field has no catalog entry.
    #[error("Missing metadata for field '{field}'")]
    MissingMetadata { field: String },

    /// The field's accessor cannot be forwarded.
    #[error("Unsupported field shape for '{field}': {reason}")]
    UnsupportedFieldShape { field: String, reason: String },

    /// A generated member would collide with an existing one.
    #[error("Synthesis conflict on '{field}': {reason}")]
    SynthesisConflict { field: String, reason: String },

    /// A field value has no document representation.
    #[error("Cannot serialize field '{field}': {reason}")]
    Serialization { field: String, reason: String },

    /// Field access failed inside the source record.
    #[error(transparent)]
    Field(#[from] CoreError),

    /// Catalog construction failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An exported document did not pass schema validation.
    #[error("Document validation failed: {errors:?}")]
    Validation {
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },

    /// A packaged type definition does not fit the record it is bound to.
    #[error("Type definition does not match {source_type}: {reason}")]
    DefinitionMismatch { source_type: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnnotationError {
    /// Field named by the error, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingMetadata { field }
            | Self::UnsupportedFieldShape { field, .. }
            | Self::SynthesisConflict { field, .. }
            | Self::Serialization { field, .. } => Some(field.as_str()),
            Self::Field(
                CoreError::UnknownField { field, .. }
                | CoreError::TypeMismatch { field, .. }
                | CoreError::OutOfRange { field, .. }
                | CoreError::Required { field }
                | CoreError::ReadOnly { field },
            ) => Some(field.as_str()),
            Self::Catalog(
                CatalogError::MissingMetadata(field) | CatalogError::DuplicateField(field),
            ) => Some(field.as_str()),
            _ => None,
        }
    }
}
