//! Catalog files loaded from disk.

use std::fs;

use gloss_config::{CatalogConfig, ConfigError, load_catalog};
use gloss_core::CatalogError;
use gloss_core::catalog::action_catalog;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const ACTION_CATALOG: &str = r#"
[[fields]]
name = "ID"
public_id = 5000000
description = "The unique identifier of the action."

[[fields]]
name = "Type"
public_id = 5000001
description = "The type code of the action."

[[fields]]
name = "Scheduled"
public_id = 5000002
description = "The scheduled date of the action."
value_type = "timestamp"

[[fields]]
name = "Entered"
public_id = 5000003
description = "The date the action was entered."

[[fields]]
name = "Comment"
public_id = 5000004
description = "Free-form comment on the action."

[[fields]]
name = "HoursRemaining"
public_id = 5000005
description = "Hours between the entered date and the scheduled date."
"#;

#[test]
fn catalog_file_matches_builtin_metadata() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, ACTION_CATALOG).unwrap();

    let loaded = load_catalog(&path).unwrap();
    let builtin = action_catalog();
    assert_eq!(loaded.len(), builtin.len());
    for entry in builtin.entries() {
        assert_eq!(loaded.describe(&entry.name).unwrap().meta(), entry.meta());
    }
}

#[test]
fn configured_path_is_used() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        r#"
[[fields]]
name = "ID"
public_id = 42
description = "Custom id."
"#,
    )
    .unwrap();

    let config = CatalogConfig {
        path: path.display().to_string(),
    };
    let catalog = config.load().unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.describe("ID").unwrap().public_id, 42);
}

#[test]
fn duplicate_public_id_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        r#"
[[fields]]
name = "ID"
public_id = 7
description = "One."

[[fields]]
name = "Type"
public_id = 7
description = "Two."
"#,
    )
    .unwrap();

    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Catalog(CatalogError::DuplicatePublicId { public_id: 7, .. })
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = load_catalog(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::CatalogRead { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, "[[fields]]\nname = \"ID\"\n").unwrap();

    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err, ConfigError::CatalogParse { .. }));
}
