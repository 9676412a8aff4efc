use anyhow::Context;
use gloss_config::{GlossConfig, load_catalog};
use gloss_core::Catalog;

use crate::cli::GlobalFlags;

pub fn load_config() -> anyhow::Result<GlossConfig> {
    GlossConfig::load_with_dotenv().context("failed to load gloss configuration")
}

/// Resolve the catalog: `--catalog` wins over `catalog.path`, which wins over
/// the built-in action catalog.
pub fn load_active_catalog(config: &GlossConfig, flags: &GlobalFlags) -> anyhow::Result<Catalog> {
    let catalog = match &flags.catalog {
        Some(path) => load_catalog(path)?,
        None => config.catalog.load()?,
    };
    tracing::debug!(entries = catalog.len(), "catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use gloss_core::catalog::action_catalog;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::OutputFormat;

    fn write_catalog(dir: &Path, name: &str, public_id: i64) -> PathBuf {
        let path = dir.join(name);
        fs::write(
            &path,
            format!("[[fields]]\nname = \"ID\"\npublic_id = {public_id}\ndescription = \"{name}\"\n"),
        )
        .unwrap();
        path
    }

    fn flags(catalog: Option<PathBuf>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            catalog,
        }
    }

    fn configured(path: &Path) -> GlossConfig {
        let mut config = GlossConfig::default();
        config.catalog.path = path.display().to_string();
        config
    }

    #[test]
    fn catalog_flag_wins_over_configured_path() {
        let dir = TempDir::new().unwrap();
        let from_config = write_catalog(dir.path(), "config.toml", 1);
        let from_flag = write_catalog(dir.path(), "flag.toml", 2);

        let catalog = load_active_catalog(&configured(&from_config), &flags(Some(from_flag))).unwrap();
        assert_eq!(catalog.describe("ID").unwrap().public_id, 2);
    }

    #[test]
    fn configured_path_wins_over_builtin() {
        let dir = TempDir::new().unwrap();
        let from_config = write_catalog(dir.path(), "config.toml", 1);

        let catalog = load_active_catalog(&configured(&from_config), &flags(None)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.describe("ID").unwrap().public_id, 1);
    }

    #[test]
    fn builtin_catalog_without_overrides() {
        let catalog = load_active_catalog(&GlossConfig::default(), &flags(None)).unwrap();
        assert_eq!(catalog, action_catalog());
    }

    #[test]
    fn missing_flag_catalog_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_active_catalog(
            &GlossConfig::default(),
            &flags(Some(dir.path().join("absent.toml"))),
        );
        assert!(result.is_err());
    }
}
