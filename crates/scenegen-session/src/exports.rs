//! Export actions
//!
//! What can be done with generated code, when it is offered, and the names
//! and links it produces.

use crate::file::{ModelFile, ModelFormat};
use scenegen_codegen::Dialect;
use serde::Serialize;

/// Online sandbox base URL
pub const SANDBOX_BASE_URL: &str = "https://codesandbox.io/s";

/// One export action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportAction {
    /// Copy the source to the clipboard
    CopyToClipboard,
    /// Download the sandbox project as zip
    DownloadZip,
    /// Open the project in the online sandbox
    OpenInSandbox,
    /// Download a rendered image
    DownloadImage,
}

impl ExportAction {
    /// Every action, in menu order
    pub const ALL: [Self; 4] = [
        Self::CopyToClipboard,
        Self::DownloadZip,
        Self::OpenInSandbox,
        Self::DownloadImage,
    ];

    /// Whether the action is offered
    ///
    /// The sandbox cannot take binary models and is withdrawn once it failed.
    #[must_use]
    pub fn is_available(self, file: &ModelFile, sandbox_failed: bool) -> bool {
        match self {
            Self::OpenInSandbox => file.format() != ModelFormat::Glb && !sandbox_failed,
            Self::CopyToClipboard | Self::DownloadZip | Self::DownloadImage => true,
        }
    }

    /// Download name, for actions that produce a file
    #[must_use]
    pub fn file_name(self, file: &ModelFile) -> Option<String> {
        match self {
            Self::DownloadZip => Some(format!("{}.zip", file.stem())),
            Self::DownloadImage => Some(format!("{}.png", file.stem())),
            Self::CopyToClipboard | Self::OpenInSandbox => None,
        }
    }
}

/// Link to the `Model` source of a created sandbox
#[must_use]
pub fn sandbox_url(sandbox_id: &str, dialect: Dialect) -> String {
    format!(
        "{SANDBOX_BASE_URL}/{sandbox_id}?file=/src/Model.{}",
        dialect.extension()
    )
}
