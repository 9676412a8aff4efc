//! Metadata catalog: field name -> stable public id + description.
//!
//! A `Catalog` is validated once at construction (unique names, unique public
//! ids) and immutable afterwards. It is passed explicitly to the synthesizer,
//! so several catalogs can coexist in one process.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;
use crate::value::ValueType;

/// Catalog entry describing one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct FieldDescriptor {
    pub name: String,
    /// Declared semantic type. When set, it must match the bound member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    /// Globally unique identifier, stable across revisions.
    pub public_id: i64,
    pub description: String,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, public_id: i64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: None,
            public_id,
            description: description.into(),
        }
    }

    #[must_use]
    pub const fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// The annotation payload attached to accessors for this field.
    #[must_use]
    pub fn meta(&self) -> MetaInfo {
        MetaInfo {
            public_id: self.public_id,
            description: self.description.clone(),
        }
    }
}

/// Metadata annotation attached to a forwarding accessor.
///
/// Rendered as `{"PublicId": .., "Description": ..}` in exported documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct MetaInfo {
    #[serde(rename = "PublicId")]
    pub public_id: i64,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Immutable table of field descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, preserving entry order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateField` if two entries share a name, or
    /// `CatalogError::DuplicatePublicId` if two entries share a public id.
    pub fn new(entries: Vec<FieldDescriptor>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());
        let mut ids: HashMap<i64, &str> = HashMap::with_capacity(entries.len());

        for (pos, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateField(entry.name.clone()));
            }
            if let Some(first) = ids.insert(entry.public_id, &entry.name) {
                return Err(CatalogError::DuplicatePublicId {
                    public_id: entry.public_id,
                    first: first.to_string(),
                    second: entry.name.clone(),
                });
            }
        }

        Ok(Self { entries, index })
    }

    /// Look up the descriptor for `field`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingMetadata` if the field has no entry.
    pub fn describe(&self, field: &str) -> Result<&FieldDescriptor, CatalogError> {
        self.get(field)
            .ok_or_else(|| CatalogError::MissingMetadata(field.to_string()))
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldDescriptor> {
        self.index.get(field).map(|&pos| &self.entries[pos])
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    /// Entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[FieldDescriptor] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A copy of this catalog without the entry for `field`.
    #[must_use]
    pub fn without(&self, field: &str) -> Self {
        let entries: Vec<FieldDescriptor> = self
            .entries
            .iter()
            .filter(|e| e.name != field)
            .cloned()
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(pos, e)| (e.name.clone(), pos))
            .collect();
        Self { entries, index }
    }

    /// In-process digest of the catalog content, used as a cache key.
    /// Equal catalogs have equal fingerprints within one process; the value
    /// is not stable across toolchain versions and must not be persisted.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.entries.hash(&mut hasher);
        hasher.finish()
    }
}

/// Built-in catalog for [`crate::Action`].
///
/// # Panics
///
/// Never in practice: the table below has unique names and public ids, which
/// the `builtin_catalog_is_valid` test pins down.
#[must_use]
pub fn action_catalog() -> Catalog {
    let entries = vec![
        FieldDescriptor::new("ID", 5_000_000, "The unique identifier of the action.")
            .with_value_type(ValueType::Int),
        FieldDescriptor::new("Type", 5_000_001, "The type code of the action.")
            .with_value_type(ValueType::Int),
        FieldDescriptor::new("Scheduled", 5_000_002, "The scheduled date of the action.")
            .with_value_type(ValueType::Timestamp),
        FieldDescriptor::new("Entered", 5_000_003, "The date the action was entered.")
            .with_value_type(ValueType::Timestamp),
        FieldDescriptor::new("Comment", 5_000_004, "Free-form comment on the action.")
            .with_value_type(ValueType::Text),
        FieldDescriptor::new(
            "HoursRemaining",
            5_000_005,
            "Hours between the entered date and the scheduled date.",
        )
        .with_value_type(ValueType::Real),
    ];
    Catalog::new(entries).expect("built-in action catalog has unique names and ids")
}
