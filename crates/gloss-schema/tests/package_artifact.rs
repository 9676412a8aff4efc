//! Packaged type definitions written to and read back from disk.

use gloss_core::Action;
use gloss_core::catalog::action_catalog;
use gloss_schema::{AnnotationError, FORMAT_VERSION, SynthesisCache, TypeDefinition, synthesize};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn written_definition_binds_in_a_fresh_cache() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("Annotated.Action.json");

    let cache = SynthesisCache::new();
    let ty = cache.get_or_synthesize::<Action>(&action_catalog()).unwrap();
    ty.definition().write_to(&path).unwrap();
    assert!(path.exists());

    let loaded = TypeDefinition::read_from(&path).unwrap();
    assert_eq!(loaded.format_version, FORMAT_VERSION);
    assert_eq!(loaded, ty.definition());

    let bound = loaded.bind::<Action>().unwrap();
    assert_ne!(bound.synthesis_id(), ty.synthesis_id());

    let mut original = ty.create();
    original.set_id(9);
    let mut rebound = std::sync::Arc::new(bound).create();
    rebound.set_id(9);
    assert_eq!(original.export().unwrap(), rebound.export().unwrap());
}

#[test]
fn artifact_is_pretty_json_with_metadata() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("action.json");
    synthesize::<Action>(&action_catalog())
        .unwrap()
        .definition()
        .write_to(&path)
        .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.ends_with('\n'));
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["source_type"], "Action");
    assert_eq!(value["members"][2]["name"], "Scheduled");
    assert_eq!(value["members"][2]["value_type"], "timestamp");
    assert_eq!(value["members"][2]["meta"]["PublicId"], 5_000_002);
}

#[test]
fn reading_a_missing_artifact_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = TypeDefinition::read_from(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, AnnotationError::Io(_)));
}

#[test]
fn reading_garbage_is_a_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = TypeDefinition::read_from(&path).unwrap_err();
    assert!(matches!(err, AnnotationError::Json(_)));
}
