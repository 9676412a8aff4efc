//! # gloss-core
//!
//! Core types for Gloss.
//!
//! This crate provides the foundational pieces shared by every Gloss crate:
//! - Dynamic field values and their semantic types
//! - The `Record` introspection trait (ordered accessor tables)
//! - The `Action` source record
//! - The metadata catalog (field name -> public id + description)
//! - Cross-cutting error types
//!
//! Nothing here knows about annotation or export. `gloss-schema` consumes
//! these types and builds annotated types on top of them.

pub mod action;
pub mod catalog;
pub mod errors;
pub mod record;
pub mod value;

pub use action::Action;
pub use catalog::{Catalog, FieldDescriptor, MetaInfo};
pub use errors::{CatalogError, CoreError};
pub use record::{Accessor, Member, Record};
pub use value::{FieldValue, FromFieldValue, ValueType};
