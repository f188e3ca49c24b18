//! Regeneration
//!
//! Provides [`Regenerator`]: re-parse the loaded bytes, generate component
//! source, format it with the profile `types` selects, and package the
//! result as a [`SessionDelta`].

use crate::error::LoadError;
use crate::file::ModelFile;
use crate::loader::ModelLoader;
use crate::session::{RegenToken, SessionDelta};
use scenegen_codegen::{CodeGenerator, FormatProfile, Formatter, GenerationConfig};
use scenegen_graph::{LoadedModel, SceneGraph};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which scene code is generated from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegenerationPath {
    /// Generate from the live, edited scene; the fresh parse only supplies
    /// animations
    #[default]
    SpliceLive,
    /// Generate from the fresh parse; edits do not reach the code
    Reparse,
}

/// Output of one regeneration
#[derive(Debug, Clone)]
pub struct Regeneration {
    /// Request answered
    pub token: RegenToken,
    /// Source text, formatted unless the formatter failed
    pub code: String,
    /// Whether the formatter succeeded
    pub formatted: bool,
    /// Whether the parse carried animations
    pub animations: bool,
    /// Freshly parsed scene
    pub scene: SceneGraph,
}

impl Regeneration {
    /// Delta that stores this result in a session
    #[must_use]
    pub fn into_delta(self) -> SessionDelta {
        SessionDelta::Regenerated {
            token: self.token,
            code: self.code,
            animations: self.animations,
            scene: Some(self.scene),
        }
    }
}

/// Parse, generate, format
#[derive(Debug, Clone)]
pub struct Regenerator {
    loader: Arc<dyn ModelLoader>,
    generator: Arc<dyn CodeGenerator>,
    formatter: Arc<dyn Formatter>,
    path: RegenerationPath,
}

impl Regenerator {
    /// Create regenerator on the splice-live path
    #[must_use]
    pub fn new(
        loader: Arc<dyn ModelLoader>,
        generator: Arc<dyn CodeGenerator>,
        formatter: Arc<dyn Formatter>,
    ) -> Self {
        Self {
            loader,
            generator,
            formatter,
            path: RegenerationPath::default(),
        }
    }

    /// With regeneration path
    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: RegenerationPath) -> Self {
        self.path = path;
        self
    }

    /// Active path
    #[inline]
    #[must_use]
    pub fn path(&self) -> RegenerationPath {
        self.path
    }

    /// Loader used for every parse
    #[inline]
    #[must_use]
    pub fn loader(&self) -> &Arc<dyn ModelLoader> {
        &self.loader
    }

    /// Run one regeneration
    ///
    /// Formatter failures fall back to the unformatted text.
    ///
    /// # Errors
    /// Returns [`LoadError`] when the bytes no longer parse.
    pub async fn regenerate(
        &self,
        file: &ModelFile,
        live: Option<&SceneGraph>,
        config: &GenerationConfig,
        token: RegenToken,
    ) -> Result<Regeneration, LoadError> {
        let parsed = self.loader.load(Arc::clone(file.bytes()), file.format()).await?;
        let animations = parsed.has_animations();

        let spliced;
        let model = match (self.path, live) {
            (RegenerationPath::SpliceLive, Some(live)) => {
                spliced = LoadedModel::new(live.clone()).with_animations(parsed.animations.clone());
                &spliced
            }
            _ => &parsed,
        };

        let raw = self.generator.generate(file.name(), model, config);
        let profile = FormatProfile::for_config(config);
        let (code, formatted) = match self.formatter.format(&raw, &profile) {
            Ok(code) => (code, true),
            Err(err) => {
                tracing::warn!(%err, parser = %profile.parser, "formatting failed, keeping raw source");
                (raw, false)
            }
        };

        tracing::info!(
            file = %file.name(),
            %token,
            path = ?self.path,
            animations,
            formatted,
            "regenerated source"
        );
        Ok(Regeneration {
            token,
            code,
            formatted,
            animations,
            scene: parsed.scene,
        })
    }
}
