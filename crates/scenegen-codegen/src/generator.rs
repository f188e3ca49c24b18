//! Code generator trait

use crate::config::GenerationConfig;
use scenegen_graph::LoadedModel;

/// Turns a loaded model into component source
///
/// Generation is synchronous and infallible: whatever the model holds, some
/// source text comes out.
pub trait CodeGenerator: Send + Sync + std::fmt::Debug {
    /// Generate source for `file_name` from `model` under `config`
    fn generate(&self, file_name: &str, model: &LoadedModel, config: &GenerationConfig) -> String;
}
