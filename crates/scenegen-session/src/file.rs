//! Model files
//!
//! Provides [`ModelFile`]: the name, raw bytes and (for glTF JSON) original
//! text of one dropped or opened model.

use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::path::Path;
use std::sync::Arc;

/// Container format of a model file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// glTF JSON (`.gltf`)
    Gltf,
    /// Binary glTF (`.glb`)
    Glb,
}

impl ModelFormat {
    /// Detect from a file name's extension
    ///
    /// # Errors
    /// Returns [`LoadError::UnsupportedFormat`] for any other extension.
    pub fn from_file_name(name: &str) -> Result<Self, LoadError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("gltf") => Ok(Self::Gltf),
            Some("glb") => Ok(Self::Glb),
            _ => Err(LoadError::UnsupportedFormat(name.to_string())),
        }
    }

    /// File extension
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Gltf => "gltf",
            Self::Glb => "glb",
        }
    }
}

impl Display for ModelFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One model file held by a session
///
/// Bytes are shared, so cloning is cheap and regenerations re-parse the
/// exact buffer that was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFile {
    name: String,
    format: ModelFormat,
    bytes: Arc<[u8]>,
    original_text: Option<String>,
}

impl ModelFile {
    /// Wrap bytes under a file name
    ///
    /// glTF JSON files keep their text for the sandbox archive.
    ///
    /// # Errors
    /// Returns [`LoadError::UnsupportedFormat`] for unknown extensions.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Result<Self, LoadError> {
        let name = name.into();
        let format = ModelFormat::from_file_name(&name)?;
        let bytes = bytes.into();
        let original_text = match format {
            ModelFormat::Gltf => std::str::from_utf8(&bytes).ok().map(str::to_string),
            ModelFormat::Glb => None,
        };
        Ok(Self {
            name,
            format,
            bytes,
            original_text,
        })
    }

    /// Read a file from disk
    ///
    /// # Errors
    /// Returns [`LoadError::Io`] when reading fails and
    /// [`LoadError::UnsupportedFormat`] for unknown extensions.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        ModelFormat::from_file_name(&name)?;
        let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(file = %name, bytes = bytes.len(), "read model file");
        Self::new(name, bytes)
    }

    /// File name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name up to the first dot, used for export file names
    #[must_use]
    pub fn stem(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }

    /// Container format
    #[inline]
    #[must_use]
    pub fn format(&self) -> ModelFormat {
        self.format
    }

    /// Raw bytes
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    /// Original text, for glTF JSON
    #[inline]
    #[must_use]
    pub fn original_text(&self) -> Option<&str> {
        self.original_text.as_deref()
    }
}
