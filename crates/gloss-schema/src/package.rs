//! Packaged type definitions.
//!
//! A `TypeDefinition` is the persisted, loadable form of an annotated type:
//! the source type name plus every member's shape and metadata, written as
//! pretty JSON. Another process binds it back to the same record type with
//! [`TypeDefinition::bind`], which re-synthesizes and checks the shape.

use std::fs;
use std::path::Path;

use gloss_core::{Catalog, FieldDescriptor, MetaInfo, Record, ValueType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AnnotationError;
use crate::synth::{AnnotatedType, synthesize};

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeDefinition {
    pub format_version: u32,
    pub name: String,
    pub source_type: String,
    pub members: Vec<MemberDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MemberDefinition {
    pub name: String,
    pub value_type: ValueType,
    pub optional: bool,
    pub mutable: bool,
    pub meta: MetaInfo,
}

impl<R: Record> AnnotatedType<R> {
    /// Shape and metadata of this type. Identical for every synthesis from
    /// the same record type and catalog.
    #[must_use]
    pub fn definition(&self) -> TypeDefinition {
        TypeDefinition {
            format_version: FORMAT_VERSION,
            name: self.name().to_string(),
            source_type: R::TYPE_NAME.to_string(),
            members: self
                .accessors()
                .iter()
                .map(|a| MemberDefinition {
                    name: a.name().to_string(),
                    value_type: a.value_type(),
                    optional: a.is_optional(),
                    mutable: a.is_mutable(),
                    meta: a.meta().clone(),
                })
                .collect(),
        }
    }
}

impl TypeDefinition {
    /// Write the definition as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::Io` or `AnnotationError::Json`.
    pub fn write_to(&self, path: &Path) -> Result<(), AnnotationError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut rendered = serde_json::to_string_pretty(self)?;
        rendered.push('\n');
        fs::write(path, rendered)?;
        tracing::info!(type_name = %self.name, path = %path.display(), "packaged annotated type");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AnnotationError::Io` or `AnnotationError::Json`.
    pub fn read_from(path: &Path) -> Result<Self, AnnotationError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Catalog equivalent to the metadata stored in this definition.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::Catalog` if the definition repeats a name or
    /// public id.
    pub fn catalog(&self) -> Result<Catalog, AnnotationError> {
        let entries = self
            .members
            .iter()
            .map(|m| {
                FieldDescriptor::new(m.name.clone(), m.meta.public_id, m.meta.description.clone())
                    .with_value_type(m.value_type)
            })
            .collect();
        Ok(Catalog::new(entries)?)
    }

    /// Rebuild the annotated type for `R` from this definition.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::DefinitionMismatch` if the format version,
    /// source type, or any member differs from what `R` synthesizes to, and
    /// any synthesis error otherwise.
    pub fn bind<R: Record>(&self) -> Result<AnnotatedType<R>, AnnotationError> {
        let mismatch = |reason: String| AnnotationError::DefinitionMismatch {
            source_type: R::TYPE_NAME.to_string(),
            reason,
        };

        if self.format_version != FORMAT_VERSION {
            return Err(mismatch(format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                self.format_version
            )));
        }
        if self.source_type != R::TYPE_NAME {
            return Err(mismatch(format!(
                "definition was packaged for '{}'",
                self.source_type
            )));
        }

        let annotated = synthesize::<R>(&self.catalog()?)?;
        let rebuilt = annotated.definition();

        if rebuilt.name != self.name {
            return Err(mismatch(format!(
                "type name '{}' differs from '{}'",
                self.name, rebuilt.name
            )));
        }
        if rebuilt.members.len() != self.members.len() {
            return Err(mismatch(format!(
                "definition has {} members, record has {}",
                self.members.len(),
                rebuilt.members.len()
            )));
        }
        for (stored, actual) in self.members.iter().zip(&rebuilt.members) {
            if stored != actual {
                return Err(mismatch(format!("member '{}' differs", stored.name)));
            }
        }

        Ok(annotated)
    }
}
