//! Reconciliation loop
//!
//! Provides [`Reconciler`], which owns a [`Session`] and drives the cycle
//! detect change → patch scene → regenerate source.
//!
//! # Flow
//!
//! 1. [`Reconciler::load`] resets the session, parses the file, generates
//!    code, names and indexes every node and seeds the property snapshot.
//! 2. [`Reconciler::edit`] records control edits in the snapshot.
//! 3. [`Reconciler::sync`] notices the new snapshot revision, patches the
//!    live scene by node id and regenerates once.

use crate::archive::{ArchiveBuilder, ArchiveRequest, ZipArchiveBuilder};
use crate::config::StudioConfig;
use crate::detector::{ChangeDetector, SyncPhase};
use crate::error::{Result, SessionError};
use crate::exports::{sandbox_url, ExportAction};
use crate::file::ModelFile;
use crate::loader::GltfLoader;
use crate::preview::PreviewConfig;
use crate::regen::Regenerator;
use crate::session::{ApplyOutcome, Session, SessionDelta};
use scenegen_codegen::{GenerationConfig, JsxGenerator, SourceFormatter};
use scenegen_graph::{PropertyValue, SceneGraph};
use scenegen_props::{
    ControlSchema, NodePropertyIndex, PatchReport, PropertyKey, PropertyPatcher, PropertySnapshot,
    SchemaCache, SyntheticBatch,
};
use std::sync::Arc;

/// Drives one editing session
#[derive(Debug)]
pub struct Reconciler {
    session: Session,
    regenerator: Regenerator,
    archiver: Arc<dyn ArchiveBuilder>,
    config: GenerationConfig,
    preview: PreviewConfig,
    schema: SchemaCache,
    snapshot: Option<PropertySnapshot>,
    detector: ChangeDetector,
    patcher: PropertyPatcher,
    animations_seen: bool,
    sandbox_failed: bool,
    regenerations: u64,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(
            Regenerator::new(
                Arc::new(GltfLoader::new()),
                Arc::new(JsxGenerator::new()),
                Arc::new(SourceFormatter::new()),
            ),
            Arc::new(ZipArchiveBuilder::new()),
        )
    }
}

impl Reconciler {
    /// Create reconciler with the given collaborators
    #[must_use]
    pub fn new(regenerator: Regenerator, archiver: Arc<dyn ArchiveBuilder>) -> Self {
        Self {
            session: Session::new(),
            regenerator,
            archiver,
            config: GenerationConfig::default(),
            preview: PreviewConfig::default(),
            schema: SchemaCache::new(),
            snapshot: None,
            detector: ChangeDetector::new(),
            patcher: PropertyPatcher::new(),
            animations_seen: false,
            sandbox_failed: false,
            regenerations: 0,
        }
    }

    /// With generation config
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    /// With preview config
    #[inline]
    #[must_use]
    pub fn with_preview(mut self, preview: PreviewConfig) -> Self {
        self.preview = preview;
        self
    }

    /// With every section of a studio config
    #[must_use]
    pub fn with_studio_config(mut self, studio: StudioConfig) -> Self {
        self.config = studio.generation;
        self.preview = studio.preview;
        self.regenerator = self.regenerator.with_path(studio.regeneration);
        self
    }

    /// Load a new model file
    ///
    /// Everything from the previous file is dropped first.
    ///
    /// # Errors
    /// Returns [`SessionError::Load`] when the file does not parse.
    pub async fn load(&mut self, file: ModelFile) -> Result<()> {
        self.session.apply(SessionDelta::Loaded(file));
        self.schema.clear();
        self.snapshot = None;
        self.sandbox_failed = false;
        self.detector.observe(None, 0);

        // a model that cannot be parsed leaves nothing behind, not even exports
        if let Err(err) = self.regenerate().await {
            self.session.apply(SessionDelta::Cleared);
            return Err(err);
        }

        let index = NodePropertyIndex::build(self.session.scene_mut());
        self.snapshot = PropertySnapshot::from_index(&index);
        self.observe();
        tracing::info!(
            properties = index.len(),
            animations = self.session.animations(),
            "model loaded"
        );
        Ok(())
    }

    /// Control schema for the live scene, memoized per scene identity
    pub fn schema(&mut self) -> Option<Arc<ControlSchema>> {
        self.schema.schema_for(self.session.scene_mut())
    }

    /// Record an edit by structured key
    ///
    /// Returns whether the value changed.
    ///
    /// # Errors
    /// Returns [`SessionError::NoModel`] before a model is loaded and
    /// [`SessionError::Edit`] for unknown keys or mismatched kinds.
    pub fn edit(&mut self, key: PropertyKey, value: PropertyValue) -> Result<bool> {
        let snapshot = self.snapshot.as_mut().ok_or(SessionError::NoModel)?;
        Ok(snapshot.set(key, value)?)
    }

    /// Record an edit for every control carrying a synthetic key
    ///
    /// Returns how many values changed; zero for keys no control carries.
    ///
    /// # Errors
    /// Same as [`Reconciler::edit`].
    pub fn edit_synthetic(&mut self, synthetic: &str, value: PropertyValue) -> Result<usize> {
        let schema = self.schema().ok_or(SessionError::NoModel)?;
        let mut changed = 0;
        for key in schema.resolve(synthetic) {
            if self.edit(key, value)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Run a pending cycle: patch the scene from the snapshot, regenerate
    ///
    /// Returns `true` when a regeneration ran.
    ///
    /// # Errors
    /// Returns [`SessionError::Load`] when re-parsing fails.
    pub async fn sync(&mut self) -> Result<bool> {
        if self.observe() != SyncPhase::Dirty {
            return Ok(false);
        }
        let Some(point) = self.detector.pending() else {
            return Ok(false);
        };

        if let Some(snapshot) = &self.snapshot {
            let report = self.patcher.apply_snapshot(self.session.scene_mut(), snapshot);
            tracing::debug!(applied = report.applied, revision = point.revision, "patched live scene");
        }
        self.regenerate().await?;
        self.detector.complete(point);
        Ok(true)
    }

    /// Patch the live scene from a string-keyed batch, then sync
    ///
    /// Keys are routed by node name. Values that land are folded back into
    /// the snapshot so the controls show them. No-op without a scene.
    ///
    /// # Errors
    /// Same as [`Reconciler::sync`].
    pub async fn apply_synthetic(&mut self, batch: &SyntheticBatch) -> Result<PatchReport> {
        let report = self.patcher.apply_synthetic(self.session.scene_mut(), batch);
        if report.applied == 0 {
            return Ok(report);
        }

        let index = NodePropertyIndex::build(self.session.scene_mut());
        if let Some(snapshot) = self.snapshot.as_mut() {
            for descriptor in &index {
                if let Err(err) = snapshot.set(descriptor.key, descriptor.value) {
                    tracing::debug!(key = %descriptor.key, %err, "snapshot out of step with scene");
                }
            }
        }
        self.sync().await?;
        Ok(report)
    }

    /// Replace the generation config and regenerate once
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] for out-of-range values, leaving the
    /// config unchanged, and [`SessionError::Load`] when re-parsing fails.
    pub async fn set_config(&mut self, config: GenerationConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        if self.session.file().is_some() {
            self.regenerate().await?;
        }
        Ok(())
    }

    /// Replace the preview config
    ///
    /// # Errors
    /// Returns [`SessionError::Studio`] for an intensity outside [0, 2].
    pub fn set_preview(&mut self, preview: PreviewConfig) -> Result<()> {
        preview.validate()?;
        self.preview = preview;
        Ok(())
    }

    /// Build the sandbox archive for the current code
    ///
    /// # Errors
    /// Returns [`SessionError::NoModel`] before code exists and
    /// [`SessionError::Archive`] when packing fails.
    pub async fn export_archive(&self) -> Result<Vec<u8>> {
        let file = self.session.file().ok_or(SessionError::NoModel)?;
        let code = self.session.code().ok_or(SessionError::NoModel)?;
        let request = ArchiveRequest {
            file: file.clone(),
            code: code.to_string(),
            dialect: self.config.dialect(),
            preview: self.preview,
        };
        Ok(self.archiver.build(&request).await?)
    }

    /// Export actions currently offered
    #[must_use]
    pub fn available_exports(&self) -> Vec<ExportAction> {
        let Some(file) = self.session.file() else {
            return Vec::new();
        };
        ExportAction::ALL
            .into_iter()
            .filter(|action| action.is_available(file, self.sandbox_failed))
            .collect()
    }

    /// Link to the `Model` source of a created sandbox
    ///
    /// # Errors
    /// Returns [`SessionError::SandboxUnavailable`] when the action is not
    /// offered for the current file.
    pub fn sandbox_link(&self, sandbox_id: &str) -> Result<String> {
        let file = self.session.file().ok_or(SessionError::NoModel)?;
        if !ExportAction::OpenInSandbox.is_available(file, self.sandbox_failed) {
            return Err(SessionError::SandboxUnavailable(file.name().to_string()));
        }
        Ok(sandbox_url(sandbox_id, self.config.dialect()))
    }

    /// Withdraw the sandbox action after a failed upload
    pub fn mark_sandbox_failed(&mut self) {
        tracing::warn!("sandbox export failed, withdrawing action");
        self.sandbox_failed = true;
    }

    /// Session state
    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Generated source
    #[inline]
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.session.code()
    }

    /// Live scene
    #[inline]
    #[must_use]
    pub fn scene(&self) -> Option<&SceneGraph> {
        self.session.scene()
    }

    /// Property snapshot
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Option<&PropertySnapshot> {
        self.snapshot.as_ref()
    }

    /// Active generation config
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Active preview config
    #[inline]
    #[must_use]
    pub fn preview(&self) -> &PreviewConfig {
        &self.preview
    }

    /// Detector phase as of the last observation
    #[inline]
    #[must_use]
    pub fn phase(&self) -> SyncPhase {
        self.detector.phase()
    }

    /// Regenerations run so far
    #[inline]
    #[must_use]
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    fn observe(&mut self) -> SyncPhase {
        let scene = self.session.scene().map(SceneGraph::id);
        let revision = self.snapshot.as_ref().map_or(0, PropertySnapshot::revision);
        self.detector.observe(scene, revision)
    }

    /// Regenerate, then let `verbose` follow a changed animations flag
    async fn regenerate(&mut self) -> Result<()> {
        self.regenerate_once().await?;
        let animations = self.session.animations();
        if animations != self.animations_seen {
            self.animations_seen = animations;
            self.config.verbose = animations;
            tracing::info!(verbose = animations, "verbose follows animations");
            self.regenerate_once().await?;
        }
        Ok(())
    }

    async fn regenerate_once(&mut self) -> Result<ApplyOutcome> {
        let file = self.session.file().cloned().ok_or(SessionError::NoModel)?;
        let token = self.session.issue_token();
        let result = self
            .regenerator
            .regenerate(&file, self.session.scene(), &self.config, token)
            .await?;
        self.regenerations += 1;
        Ok(self.session.apply(result.into_delta()))
    }
}
