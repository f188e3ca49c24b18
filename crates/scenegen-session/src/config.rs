//! Studio config file
//!
//! TOML file bundling generation switches, preview staging and the
//! regeneration path:
//!
//! ```toml
//! regeneration = "splice-live"
//!
//! [generation]
//! types = true
//! precision = 3
//!
//! [preview]
//! environment = "sunset"
//! ```

use crate::error::StudioConfigError;
use crate::preview::PreviewConfig;
use crate::regen::RegenerationPath;
use scenegen_codegen::GenerationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Studio configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Code generation switches
    pub generation: GenerationConfig,
    /// Preview staging
    pub preview: PreviewConfig,
    /// Regeneration path
    pub regeneration: RegenerationPath,
}

impl StudioConfig {
    /// Parse and validate TOML text
    ///
    /// # Errors
    /// Returns [`StudioConfigError`] for invalid TOML or out-of-range values.
    pub fn from_toml(text: &str) -> Result<Self, StudioConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a file
    ///
    /// # Errors
    /// Returns [`StudioConfigError::Io`] when the file cannot be read, and the
    /// errors of [`StudioConfig::from_toml`].
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StudioConfigError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StudioConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "loaded studio config");
        Ok(config)
    }

    /// Check every section
    ///
    /// # Errors
    /// Returns the first out-of-range value found.
    pub fn validate(&self) -> Result<(), StudioConfigError> {
        self.generation.validate()?;
        self.preview.validate()
    }
}
