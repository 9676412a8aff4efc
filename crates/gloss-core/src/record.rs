//! Record introspection.
//!
//! A `Record` describes its public fields as an ordered table of `Member`s.
//! Each member carries plain `fn` pointers to the record's own read and write
//! logic, so the table is immutable, `Copy`, and can be shared across threads.
//! Annotated types in `gloss-schema` are built from this table.

use std::fmt;

use crate::errors::CoreError;
use crate::value::{FieldValue, ValueType};

/// Reads one field from a record.
pub type Getter<R> = fn(&R) -> Option<FieldValue>;

/// Writes one field on a record, running the record's own mutation logic.
pub type Setter<R> = fn(&mut R, Option<FieldValue>) -> Result<(), CoreError>;

/// How a member is accessed.
pub enum Accessor<R> {
    /// Stored field with a read and a write accessor.
    ReadWrite { get: Getter<R>, set: Setter<R> },
    /// Derived field, computed on read.
    ReadOnly { get: Getter<R> },
    /// Parameterized accessor (e.g. an indexer). Cannot be forwarded.
    Indexed { params: &'static [ValueType] },
}

impl<R> Accessor<R> {
    /// Read accessor, if the member can be read without arguments.
    #[must_use]
    pub fn getter(&self) -> Option<Getter<R>> {
        match self {
            Self::ReadWrite { get, .. } | Self::ReadOnly { get } => Some(*get),
            Self::Indexed { .. } => None,
        }
    }

    /// Write accessor, if the member is mutable.
    #[must_use]
    pub fn setter(&self) -> Option<Setter<R>> {
        match self {
            Self::ReadWrite { set, .. } => Some(*set),
            Self::ReadOnly { .. } | Self::Indexed { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        matches!(self, Self::ReadWrite { .. })
    }
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Accessor<R> {}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadWrite { .. } => f.write_str("ReadWrite"),
            Self::ReadOnly { .. } => f.write_str("ReadOnly"),
            Self::Indexed { params } => f.debug_struct("Indexed").field("params", params).finish(),
        }
    }
}

/// One publicly exposed field of a record.
pub struct Member<R> {
    pub name: &'static str,
    pub value_type: ValueType,
    /// Whether the field may be absent.
    pub optional: bool,
    pub accessor: Accessor<R>,
}

impl<R> Member<R> {
    #[must_use]
    pub fn read_write(
        name: &'static str,
        value_type: ValueType,
        optional: bool,
        get: Getter<R>,
        set: Setter<R>,
    ) -> Self {
        Self {
            name,
            value_type,
            optional,
            accessor: Accessor::ReadWrite { get, set },
        }
    }

    #[must_use]
    pub fn read_only(
        name: &'static str,
        value_type: ValueType,
        optional: bool,
        get: Getter<R>,
    ) -> Self {
        Self {
            name,
            value_type,
            optional,
            accessor: Accessor::ReadOnly { get },
        }
    }

    #[must_use]
    pub const fn indexed(
        name: &'static str,
        value_type: ValueType,
        params: &'static [ValueType],
    ) -> Self {
        Self {
            name,
            value_type,
            optional: true,
            accessor: Accessor::Indexed { params },
        }
    }
}

impl<R> Clone for Member<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Member<R> {}

impl<R> fmt::Debug for Member<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("optional", &self.optional)
            .field("accessor", &self.accessor)
            .finish()
    }
}

/// A statically declared data record whose fields can be enumerated and
/// accessed through an accessor table.
pub trait Record: Default + Send + Sync + 'static {
    /// Name of the record type, used in errors and annotated type names.
    const TYPE_NAME: &'static str;

    /// Publicly exposed members in declaration order.
    fn members() -> Vec<Member<Self>>;

    /// Look up a single member by name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownField` if the record has no such member.
    fn member(name: &str) -> Result<Member<Self>, CoreError> {
        Self::members()
            .into_iter()
            .find(|m| m.name == name)
            .ok_or_else(|| CoreError::UnknownField {
                type_name: Self::TYPE_NAME.to_string(),
                field: name.to_string(),
            })
    }
}
