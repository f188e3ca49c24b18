//! scenegen Code Generation
//!
//! Turns a loaded scene into react-three-fiber component source.
//!
//! # Overview
//!
//! - **GenerationConfig**: the switches (`types`, `instance`, `verbose`, ...)
//! - **CodeGenerator** / **JsxGenerator**: scene to JSX or TSX
//! - **Formatter** / **SourceFormatter**: layout pass with a `typescript` or
//!   `babel` parser profile chosen by `types`
//!
//! # Example
//!
//! ```rust
//! use scenegen_codegen::{CodeGenerator, FormatProfile, Formatter, GenerationConfig, JsxGenerator, SourceFormatter};
//! use scenegen_graph::{LoadedModel, MeshBinding, SceneGraph, SceneNode};
//!
//! let model = LoadedModel::new(SceneGraph::new(SceneNode::mesh("Cube", MeshBinding::new("Cube", None))));
//! let config = GenerationConfig::default();
//!
//! let code = JsxGenerator::new().generate("cube.glb", &model, &config);
//! let code = SourceFormatter::new().format(&code, &FormatProfile::for_config(&config)).unwrap();
//! assert!(code.contains("useGLTF.preload('/cube.glb')"));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod jsx;

// Re-exports
pub use config::{Dialect, GenerationConfig, DEFAULT_PRINT_WIDTH, PRECISION_RANGE};
pub use error::{ConfigError, FormatError};
pub use format::{FormatProfile, Formatter, Parser, SourceFormatter};
pub use generator::CodeGenerator;
pub use jsx::JsxGenerator;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for code generation
    pub use crate::{
        CodeGenerator, FormatProfile, Formatter, GenerationConfig, JsxGenerator, SourceFormatter,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
