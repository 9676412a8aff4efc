//! Annotated type synthesis.
//!
//! `synthesize` walks a record's member table in declaration order and builds
//! one `ForwardingAccessor` per member. Each accessor holds the source
//! record's own getter (and setter, when the member is mutable) unchanged,
//! plus the `MetaInfo` taken from the catalog. The resulting `AnnotatedType`
//! is immutable once built.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use gloss_core::record::{Getter, Setter};
use gloss_core::{Accessor, Catalog, CoreError, FieldValue, Member, MetaInfo, Record, ValueType};

use crate::error::AnnotationError;

/// Suffix of the sibling entry holding a field's metadata.
pub const META_SUFFIX: &str = "$meta";

/// Runtime identity counter. Every synthesis gets a fresh id.
static NEXT_SYNTHESIS_ID: AtomicU64 = AtomicU64::new(1);

/// Key of the metadata entry generated for `field`.
#[must_use]
pub fn meta_key(field: &str) -> String {
    format!("{field}{META_SUFFIX}")
}

/// A generated read/write pair that delegates to the source record and
/// carries the field's metadata annotation.
pub struct ForwardingAccessor<R> {
    name: &'static str,
    value_type: ValueType,
    optional: bool,
    read: Getter<R>,
    write: Option<Setter<R>>,
    meta: MetaInfo,
}

impl<R> ForwardingAccessor<R> {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        self.write.is_some()
    }

    /// Metadata annotation attached to this accessor.
    #[must_use]
    pub const fn meta(&self) -> &MetaInfo {
        &self.meta
    }

    /// Read the field through the source record's getter.
    pub fn read(&self, target: &R) -> Option<FieldValue> {
        (self.read)(target)
    }

    /// Write the field through the source record's setter.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ReadOnly` for derived fields, otherwise whatever
    /// the source setter returns.
    pub fn write(&self, target: &mut R, value: Option<FieldValue>) -> Result<(), CoreError> {
        let set = self.write.ok_or_else(|| CoreError::ReadOnly {
            field: self.name.to_string(),
        })?;
        set(target, value)
    }
}

impl<R> fmt::Debug for ForwardingAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardingAccessor")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("optional", &self.optional)
            .field("mutable", &self.is_mutable())
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// A record type decorated with per-field metadata.
///
/// Holds no field storage of its own; instances are created with
/// [`AnnotatedType::create`].
pub struct AnnotatedType<R> {
    name: String,
    synthesis_id: u64,
    accessors: Vec<ForwardingAccessor<R>>,
    index: HashMap<&'static str, usize>,
}

impl<R: Record> AnnotatedType<R> {
    /// Name of the annotated type, e.g. `Annotated.Action`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn source_type_name(&self) -> &'static str {
        R::TYPE_NAME
    }

    /// Runtime identity of this synthesis. Differs between syntheses even
    /// when the shape is identical.
    #[must_use]
    pub const fn synthesis_id(&self) -> u64 {
        self.synthesis_id
    }

    /// Forwarding accessors in declaration order.
    #[must_use]
    pub fn accessors(&self) -> &[ForwardingAccessor<R>] {
        &self.accessors
    }

    /// Look up the forwarding accessor for `field`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownField` if the type exposes no such field.
    pub fn accessor(&self, field: &str) -> Result<&ForwardingAccessor<R>, CoreError> {
        self.index
            .get(field)
            .map(|&pos| &self.accessors[pos])
            .ok_or_else(|| CoreError::UnknownField {
                type_name: self.name.clone(),
                field: field.to_string(),
            })
    }

    /// Metadata attached to the accessor for `field`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownField` if the type exposes no such field.
    pub fn meta(&self, field: &str) -> Result<&MetaInfo, CoreError> {
        self.accessor(field).map(ForwardingAccessor::meta)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.accessors.iter().map(ForwardingAccessor::name)
    }
}

impl<R: Record> fmt::Debug for AnnotatedType<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotatedType")
            .field("name", &self.name)
            .field("source", &R::TYPE_NAME)
            .field("synthesis_id", &self.synthesis_id)
            .field("accessors", &self.accessors)
            .finish_non_exhaustive()
    }
}

/// Name given to the annotated form of `source`.
#[must_use]
pub fn annotated_type_name(source: &str) -> String {
    format!("Annotated.{source}")
}

/// Build the annotated type for `R` from `catalog`.
///
/// Members are processed in declaration order; the first failing member is
/// reported. Catalog entries that match no member are ignored with a warning.
///
/// # Errors
///
/// - `SynthesisConflict` if two members share a name, or a member's name
///   equals the metadata key generated for another member
/// - `UnsupportedFieldShape` for indexed accessors, or when the catalog
///   declares a different value type than the member has
/// - `MissingMetadata` for a member without a catalog entry
pub fn synthesize<R: Record>(catalog: &Catalog) -> Result<AnnotatedType<R>, AnnotationError> {
    let members = R::members();
    check_conflicts(&members)?;

    let accessors = members
        .iter()
        .map(|member| forward(member, catalog))
        .collect::<Result<Vec<_>, _>>()?;

    let index: HashMap<&'static str, usize> = accessors
        .iter()
        .enumerate()
        .map(|(pos, accessor)| (accessor.name, pos))
        .collect();

    for entry in catalog.entries() {
        if !index.contains_key(entry.name.as_str()) {
            tracing::warn!(
                source = R::TYPE_NAME,
                field = %entry.name,
                public_id = entry.public_id,
                "catalog entry matches no member"
            );
        }
    }

    let name = annotated_type_name(R::TYPE_NAME);
    let synthesis_id = NEXT_SYNTHESIS_ID.fetch_add(1, Ordering::Relaxed);
    tracing::info!(
        type_name = %name,
        source = R::TYPE_NAME,
        accessors = accessors.len(),
        synthesis_id,
        "synthesized annotated type"
    );

    Ok(AnnotatedType {
        name,
        synthesis_id,
        accessors,
        index,
    })
}

fn check_conflicts<R>(members: &[Member<R>]) -> Result<(), AnnotationError> {
    let mut seen = HashSet::with_capacity(members.len());
    for member in members {
        if !seen.insert(member.name) {
            return Err(AnnotationError::SynthesisConflict {
                field: member.name.to_string(),
                reason: "member is declared more than once".to_string(),
            });
        }
    }

    for member in members {
        if let Some(base) = member.name.strip_suffix(META_SUFFIX) {
            if seen.contains(base) {
                return Err(AnnotationError::SynthesisConflict {
                    field: member.name.to_string(),
                    reason: format!("collides with the metadata entry generated for '{base}'"),
                });
            }
        }
    }

    Ok(())
}

fn forward<R>(member: &Member<R>, catalog: &Catalog) -> Result<ForwardingAccessor<R>, AnnotationError> {
    let (read, write) = match member.accessor {
        Accessor::ReadWrite { get, set } => (get, Some(set)),
        Accessor::ReadOnly { get } => (get, None),
        Accessor::Indexed { params } => {
            return Err(AnnotationError::UnsupportedFieldShape {
                field: member.name.to_string(),
                reason: format!(
                    "indexed accessor with {} parameter(s) cannot be forwarded",
                    params.len()
                ),
            });
        }
    };

    let descriptor =
        catalog
            .describe(member.name)
            .map_err(|_| AnnotationError::MissingMetadata {
                field: member.name.to_string(),
            })?;

    if let Some(declared) = descriptor.value_type {
        if declared != member.value_type {
            return Err(AnnotationError::UnsupportedFieldShape {
                field: member.name.to_string(),
                reason: format!(
                    "catalog declares {declared} but the member is {}",
                    member.value_type
                ),
            });
        }
    }

    tracing::debug!(
        field = member.name,
        public_id = descriptor.public_id,
        mutable = write.is_some(),
        "forwarding accessor"
    );

    Ok(ForwardingAccessor {
        name: member.name,
        value_type: member.value_type,
        optional: member.optional,
        read,
        write,
        meta: descriptor.meta(),
    })
}
