//! JSON Schema of exported documents.
//!
//! The `MetaInfo` definition comes from `schemars`; the per-field properties
//! are built from the annotated type's accessor table. Validation uses
//! `jsonschema`.

use gloss_core::{MetaInfo, Record, ValueType};
use schemars::schema_for;
use serde_json::{Map, Value, json};

use crate::error::AnnotationError;
use crate::export::ExportedDocument;
use crate::synth::{AnnotatedType, meta_key};

const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// Matches the exporter's ISO-8601 timestamp rendering.
const TIMESTAMP_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?$";

/// Build the JSON Schema describing `export` output for `ty`.
///
/// Every field and every `<field>$meta` key is required; no other keys are
/// allowed. Metadata entries are pinned to the exact values attached to the
/// type.
///
/// # Errors
///
/// Returns `AnnotationError::Json` if the `MetaInfo` schema cannot be
/// converted to a JSON value.
pub fn document_schema<R: Record>(ty: &AnnotatedType<R>) -> Result<Value, AnnotationError> {
    let mut meta_schema = serde_json::to_value(schema_for!(MetaInfo))?;
    if let Value::Object(map) = &mut meta_schema {
        map.remove("$schema");
    }

    let mut properties = Map::new();
    let mut required = Vec::with_capacity(ty.accessors().len() * 2);

    for accessor in ty.accessors() {
        let mut property = value_schema(accessor.value_type(), accessor.is_optional());
        property.insert(
            "description".to_string(),
            Value::String(accessor.meta().description.clone()),
        );
        properties.insert(accessor.name().to_string(), Value::Object(property));
        required.push(Value::String(accessor.name().to_string()));
    }

    for accessor in ty.accessors() {
        let key = meta_key(accessor.name());
        properties.insert(
            key.clone(),
            json!({
                "$ref": "#/$defs/MetaInfo",
                "const": serde_json::to_value(accessor.meta())?,
            }),
        );
        required.push(Value::String(key));
    }

    Ok(json!({
        "$schema": DRAFT_2020_12,
        "title": ty.name(),
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
        "$defs": { "MetaInfo": meta_schema },
    }))
}

/// Validate an exported document against a schema from [`document_schema`].
///
/// # Errors
///
/// Returns `AnnotationError::Validation` listing every violation.
pub fn validate_document(schema: &Value, document: &ExportedDocument) -> Result<(), AnnotationError> {
    let validator = jsonschema::validator_for(schema).map_err(|e| AnnotationError::Validation {
        errors: vec![format!("invalid schema: {e}")],
    })?;

    let instance = Value::Object(document.as_map().clone());
    let errors: Vec<String> = validator
        .iter_errors(&instance)
        .map(|e| format!("{e}"))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AnnotationError::Validation { errors })
    }
}

fn value_schema(value_type: ValueType, nullable: bool) -> Map<String, Value> {
    let base = match value_type {
        ValueType::Int => "integer",
        ValueType::Real => "number",
        ValueType::Text | ValueType::Timestamp => "string",
    };

    let mut schema = Map::new();
    let type_value = if nullable {
        json!([base, "null"])
    } else {
        json!(base)
    };
    schema.insert("type".to_string(), type_value);

    if value_type == ValueType::Timestamp {
        schema.insert("pattern".to_string(), json!(TIMESTAMP_PATTERN));
    }
    schema
}
