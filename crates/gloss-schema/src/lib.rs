//! # gloss-schema
//!
//! Annotated type synthesis and metadata-aware export for Gloss.
//!
//! This crate provides:
//! - `synthesize`: builds an `AnnotatedType` from a `Record` and a `Catalog`,
//!   with one forwarding accessor per field and one `MetaInfo` per accessor
//! - `AnnotatedType::create`: the instance factory
//! - `export`: renders an annotated instance with `<field>$meta` siblings
//! - `document_schema`: JSON Schema of exported documents, validated with `jsonschema`
//! - `SynthesisCache`: at-most-once synthesis per (record type, catalog)
//! - `TypeDefinition`: the packaged, loadable form of an annotated type
//!
//! ## Architecture
//!
//! Source records and catalogs are defined in `gloss-core`. Nothing here
//! generates code: an annotated type is a table of `fn` pointers into the
//! source record's own accessors, paired with the metadata for each field.

mod cache;
mod document_schema;
mod error;
mod export;
mod instance;
mod package;
mod synth;

pub use cache::SynthesisCache;
pub use document_schema::{document_schema, validate_document};
pub use error::AnnotationError;
pub use export::{ExportedDocument, export};
pub use instance::AnnotatedInstance;
pub use package::{FORMAT_VERSION, MemberDefinition, TypeDefinition};
pub use synth::{
    AnnotatedType, ForwardingAccessor, META_SUFFIX, annotated_type_name, meta_key, synthesize,
};
