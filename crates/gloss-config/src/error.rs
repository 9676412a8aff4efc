//! Configuration error types.

use std::path::PathBuf;

use gloss_core::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A catalog file could not be read.
    #[error("Cannot read catalog file '{}': {source}", path.display())]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A catalog file is not valid TOML or has the wrong structure.
    #[error("Cannot parse catalog file '{}': {source}", path.display())]
    CatalogParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A catalog file parsed but its entries are inconsistent.
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
