//! Export output configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Pretty-print exported documents.
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Where to write the packaged type definition. Empty = do not package.
    #[serde(default)]
    pub artifact_path: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            artifact_path: String::new(),
        }
    }
}

impl ExportConfig {
    #[must_use]
    pub fn artifact_path(&self) -> Option<&Path> {
        (!self.artifact_path.is_empty()).then(|| Path::new(&self.artifact_path))
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `artifact_path` names an
    /// existing directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = self.artifact_path() {
            if path.is_dir() {
                return Err(ConfigError::InvalidValue {
                    field: "export.artifact_path".to_string(),
                    reason: format!("'{}' is a directory", path.display()),
                });
            }
        }
        Ok(())
    }
}
