//! Error types for scenegen sessions
//!
//! Provides error handling for:
//! - Model loading (unsupported format, parse failure, missing file)
//! - Sandbox archive creation
//! - Studio config files
//! - Reconciler operations

use scenegen_codegen::ConfigError;
use scenegen_props::SnapshotError;
use std::path::PathBuf;

/// Model loading errors
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Extension is neither `.gltf` nor `.glb`
    #[error("unsupported model format: '{0}'")]
    UnsupportedFormat(String),

    /// Bytes do not parse as the declared format
    #[error("failed to parse model: {0}")]
    Parse(String),

    /// Model declares no scene at all
    #[error("model contains no scene")]
    NoScene,

    /// File could not be read
    #[error("cannot read '{path}': {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl From<gltf::Error> for LoadError {
    fn from(err: gltf::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Archive creation errors
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// Zip writer failure
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Write into the archive buffer failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest serialization failed
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Blocking archive task did not finish
    #[error("archive task failed: {0}")]
    Task(String),
}

/// Studio config file errors
#[derive(Debug, thiserror::Error)]
pub enum StudioConfigError {
    /// File could not be read
    #[error("cannot read config '{path}': {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Not valid TOML for the studio config
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generation section out of range
    #[error(transparent)]
    Generation(#[from] ConfigError),

    /// Light intensity outside [0, 2]
    #[error("intensity must be between 0 and 2, got {0}")]
    Intensity(f32),
}

/// Reconciler errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Loading failed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Archive creation failed
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Config rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Preview or studio config rejected
    #[error(transparent)]
    Studio(#[from] StudioConfigError),

    /// Edit rejected
    #[error(transparent)]
    Edit(#[from] SnapshotError),

    /// Operation needs a loaded model
    #[error("no model loaded")]
    NoModel,

    /// Sandbox export unavailable for this file
    #[error("sandbox export is not available for '{0}'")]
    SandboxUnavailable(String),
}

/// Result alias for reconciler operations
pub type Result<T> = std::result::Result<T, SessionError>;
