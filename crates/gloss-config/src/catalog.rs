//! Catalog configuration and catalog file loading.

use std::fs;
use std::path::{Path, PathBuf};

use gloss_core::catalog::action_catalog;
use gloss_core::{Catalog, FieldDescriptor};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Path to a TOML catalog file. Empty = built-in catalog.
    #[serde(default)]
    pub path: String,
}

impl CatalogConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.path.is_empty()
    }

    /// Load the configured catalog, or the built-in one if none is set.
    ///
    /// # Errors
    ///
    /// See [`load_catalog`].
    pub fn load(&self) -> Result<Catalog, ConfigError> {
        if self.is_configured() {
            load_catalog(Path::new(&self.path))
        } else {
            Ok(action_catalog())
        }
    }
}

/// On-disk catalog layout:
///
/// ```toml
/// [[fields]]
/// name = "Scheduled"
/// public_id = 5000002
/// description = "The scheduled date of the action."
/// value_type = "timestamp" # optional
/// ```
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    fields: Vec<FieldDescriptor>,
}

/// Read and validate a TOML catalog file.
///
/// # Errors
///
/// Returns `ConfigError::CatalogRead`, `ConfigError::CatalogParse`, or
/// `ConfigError::Catalog` for duplicate names or public ids.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::CatalogRead {
        path: PathBuf::from(path),
        source,
    })?;
    parse_catalog(path, &content)
}

fn parse_catalog(path: &Path, content: &str) -> Result<Catalog, ConfigError> {
    let file: CatalogFile = toml::from_str(content).map_err(|source| ConfigError::CatalogParse {
        path: PathBuf::from(path),
        source,
    })?;
    Ok(Catalog::new(file.fields)?)
}
