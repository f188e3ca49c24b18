//! Testing utilities for scenegen workspace
//!
//! Shared fixtures and fake collaborators for reconciler tests.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use scenegen_codegen::{
    CodeGenerator, FormatError, FormatProfile, Formatter, GenerationConfig, JsxGenerator,
    SourceFormatter,
};
use scenegen_graph::{
    AnimationClip, LoadedModel, MeshBinding, NodeKind, SceneGraph, SceneNode, Transform,
};
use scenegen_session::{
    LoadError, ModelFile, ModelFormat, ModelLoader, Reconciler, Regenerator, ZipArchiveBuilder,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// `Scene` group holding meshes `Cube` and `Sphere`
pub fn two_mesh_model() -> LoadedModel {
    let cube = SceneNode::mesh("Cube", MeshBinding::new("Cube", Some("Steel".to_string())))
        .with_transform(Transform::from_trs([1.0, 0.0, 0.0], [0.0, 0.0, 0.0, 1.0], [1.0; 3]));
    let sphere = SceneNode::mesh("Sphere", MeshBinding::new("Sphere", Some("Glass".to_string())));
    let root = SceneNode::named(NodeKind::Group, "Scene")
        .with_child(cube)
        .with_child(sphere);
    LoadedModel::new(SceneGraph::new(root))
}

/// Two meshes plus a `Walk` clip
pub fn animated_model() -> LoadedModel {
    two_mesh_model().with_animations(vec![AnimationClip::new("Walk")])
}

/// Scene with an anonymous mesh under a named group
pub fn anonymous_model() -> LoadedModel {
    let root = SceneNode::named(NodeKind::Group, "Scene").with_child(
        SceneNode::named(NodeKind::Group, "Rig")
            .with_child(SceneNode::new(NodeKind::Mesh))
            .with_child(SceneNode::mesh("Arm", MeshBinding::new("Arm", None))),
    );
    LoadedModel::new(SceneGraph::new(root))
}

/// glTF JSON: a two-primitive `Body` with two `Wheel.FL` children and a
/// perspective `Main Camera`
pub const GLTF_FIXTURE: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "name": "Scene", "nodes": [0, 3] }],
  "nodes": [
    { "name": "Body", "mesh": 0, "translation": [0, 1, 0], "children": [1, 2] },
    { "name": "Wheel.FL", "mesh": 1, "translation": [1, 0, 1] },
    { "name": "Wheel.FL", "mesh": 1, "translation": [-1, 0, 1] },
    { "name": "Main Camera", "camera": 0, "translation": [0, 2, 10] }
  ],
  "meshes": [
    {
      "name": "body",
      "primitives": [
        { "attributes": { "POSITION": 0 }, "material": 0 },
        { "attributes": { "POSITION": 0 }, "material": 1 }
      ]
    },
    { "name": "wheel", "primitives": [{ "attributes": { "POSITION": 0 }, "material": 0 }] }
  ],
  "materials": [{ "name": "Paint" }, {}],
  "accessors": [
    { "componentType": 5126, "count": 3, "type": "VEC3", "min": [0, 0, 0], "max": [1, 1, 1] }
  ],
  "cameras": [{ "type": "perspective", "perspective": { "yfov": 0.8, "znear": 0.1 } }]
}"#;

pub fn gltf_file() -> ModelFile {
    ModelFile::new("car.gltf", GLTF_FIXTURE.as_bytes().to_vec()).unwrap()
}

/// File whose bytes only a [`FakeLoader`] accepts
pub fn model_file(name: &str) -> ModelFile {
    ModelFile::new(name, b"{}".to_vec()).unwrap()
}

/// Loader returning a copy of one model, counting calls
#[derive(Debug)]
pub struct FakeLoader {
    model: Mutex<LoadedModel>,
    calls: AtomicUsize,
}

impl FakeLoader {
    pub fn new(model: LoadedModel) -> Self {
        Self {
            model: Mutex::new(model),
            calls: AtomicUsize::new(0),
        }
    }

    /// Swap the model later loads return
    pub fn replace(&self, model: LoadedModel) {
        *self.model.lock() = model;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelLoader for FakeLoader {
    async fn load(&self, _bytes: Arc<[u8]>, _format: ModelFormat) -> Result<LoadedModel, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.model.lock().clone())
    }
}

/// JSX generator that counts calls and keeps the last model it saw
#[derive(Debug, Default)]
pub struct CountingGenerator {
    inner: JsxGenerator,
    calls: AtomicUsize,
    last: Mutex<Option<LoadedModel>>,
}

impl CountingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_model(&self) -> Option<LoadedModel> {
        self.last.lock().clone()
    }
}

impl CodeGenerator for CountingGenerator {
    fn generate(&self, file_name: &str, model: &LoadedModel, config: &GenerationConfig) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock() = Some(model.clone());
        self.inner.generate(file_name, model, config)
    }
}

/// Formatter that records each profile and returns the source unchanged
#[derive(Debug, Default)]
pub struct RecordingFormatter {
    profiles: Mutex<Vec<FormatProfile>>,
}

impl RecordingFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profiles(&self) -> Vec<FormatProfile> {
        self.profiles.lock().clone()
    }
}

impl Formatter for RecordingFormatter {
    fn format(&self, source: &str, profile: &FormatProfile) -> Result<String, FormatError> {
        self.profiles.lock().push(*profile);
        Ok(source.to_string())
    }
}

/// Formatter that always fails
#[derive(Debug, Default)]
pub struct FailingFormatter;

impl Formatter for FailingFormatter {
    fn format(&self, _source: &str, _profile: &FormatProfile) -> Result<String, FormatError> {
        Err(FormatError::UnterminatedString(1))
    }
}

/// Fakes wired into a reconciler
pub struct Harness {
    pub reconciler: Reconciler,
    pub loader: Arc<FakeLoader>,
    pub generator: Arc<CountingGenerator>,
}

/// Reconciler over `model` with the real formatter and archive builder
pub fn harness(model: LoadedModel) -> Harness {
    let loader = Arc::new(FakeLoader::new(model));
    let generator = Arc::new(CountingGenerator::new());
    let regenerator = Regenerator::new(
        Arc::clone(&loader) as Arc<dyn ModelLoader>,
        Arc::clone(&generator) as Arc<dyn CodeGenerator>,
        Arc::new(SourceFormatter::new()),
    );
    Harness {
        reconciler: Reconciler::new(regenerator, Arc::new(ZipArchiveBuilder::new())),
        loader,
        generator,
    }
}
