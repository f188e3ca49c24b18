//! scenegen Session
//!
//! Editing sessions over a loaded glTF model.
//!
//! # Overview
//!
//! - **ModelFile / GltfLoader**: read `.gltf` and `.glb` files into scene graphs
//! - **Session**: loaded file, live scene and generated code, updated by deltas
//! - **ChangeDetector**: Idle / Synced / Dirty tracking of snapshot revisions
//! - **Regenerator**: parse, generate and format, on the splice-live or
//!   reparse path
//! - **Reconciler**: the full cycle from control edit to regenerated code
//! - **ZipArchiveBuilder**: sandbox project archives
//!
//! # Example
//!
//! ```rust,no_run
//! use scenegen_session::{ModelFile, Reconciler};
//!
//! # async fn run() -> scenegen_session::Result<()> {
//! let file = ModelFile::read("robot.glb").await?;
//! let mut reconciler = Reconciler::default();
//! reconciler.load(file).await?;
//! println!("{}", reconciler.code().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod detector;
pub mod error;
pub mod exports;
pub mod file;
pub mod loader;
pub mod preview;
pub mod reconciler;
pub mod regen;
pub mod session;

// Re-exports
pub use archive::{ArchiveBuilder, ArchiveRequest, ZipArchiveBuilder};
pub use config::StudioConfig;
pub use detector::{
    allowed_transitions, validate_transition, ChangeDetector, IllegalTransition, SyncPhase,
    SyncPoint,
};
pub use error::{ArchiveError, LoadError, Result, SessionError, StudioConfigError};
pub use exports::{sandbox_url, ExportAction, SANDBOX_BASE_URL};
pub use file::{ModelFile, ModelFormat};
pub use loader::{GltfLoader, ModelLoader};
pub use preview::{Environment, LightingPreset, PreviewConfig};
pub use reconciler::Reconciler;
pub use regen::{Regeneration, RegenerationPath, Regenerator};
pub use session::{ApplyOutcome, RegenToken, Session, SessionDelta};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for editing sessions
    pub use crate::{
        ModelFile, ModelLoader, PreviewConfig, Reconciler, RegenerationPath, Regenerator,
        Session, SessionError, StudioConfig, SyncPhase,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
