//! Project config file (`vigil.toml`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::AuditOptions;
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Optional project-level configuration.
///
/// Resolution order (highest priority first):
/// 1. Invocation params
/// 2. Project config (`vigil.toml` in the working directory)
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VigilConfig {
    pub audit: AuditOptions,
}

impl VigilConfig {
    /// Load the project config from `root`, returning defaults when no
    /// `vigil.toml` exists. A present-but-invalid file is a fatal
    /// `ConfigError`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(PROJECT_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.audit.validate()?;
        Ok(config)
    }
}
