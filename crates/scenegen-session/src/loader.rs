//! Model loading
//!
//! Provides the [`ModelLoader`] trait and [`GltfLoader`], which builds a
//! [`SceneGraph`] from glTF JSON or GLB bytes the way three.js does: node
//! names sanitized and made unique, multi-primitive meshes split into a group
//! of meshes, skin joints as bones.

use crate::error::LoadError;
use crate::file::ModelFormat;
use async_trait::async_trait;
use gltf::camera::Projection;
use scenegen_graph::{
    AnimationClip, LoadedModel, MeshBinding, NodeKind, SceneGraph, SceneNode, Transform,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Parses model bytes into a scene graph
#[async_trait]
pub trait ModelLoader: Send + Sync + std::fmt::Debug {
    /// Parse `bytes` as `format`
    ///
    /// # Errors
    /// Returns [`LoadError`] when the bytes are not a valid model.
    async fn load(&self, bytes: Arc<[u8]>, format: ModelFormat) -> Result<LoadedModel, LoadError>;
}

/// glTF 2.0 loader backed by the `gltf` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfLoader;

impl GltfLoader {
    /// Create loader
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse synchronously
    ///
    /// # Errors
    /// Returns [`LoadError::Parse`] for invalid documents and
    /// [`LoadError::NoScene`] when the document has no scene.
    pub fn parse(bytes: &[u8]) -> Result<LoadedModel, LoadError> {
        let document = gltf::Gltf::from_slice(bytes)?;
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or(LoadError::NoScene)?;

        let joints: HashSet<usize> = document
            .skins()
            .flat_map(|skin| skin.joints().map(|joint| joint.index()))
            .collect();
        let mut builder = Builder {
            joints,
            names: HashMap::new(),
        };

        let mut root = match scene.name() {
            Some(name) => SceneNode::named(NodeKind::Group, builder.unique(name)),
            None => SceneNode::new(NodeKind::Group),
        };
        for node in scene.nodes() {
            root = root.with_child(builder.node(&node));
        }

        let animations = document
            .animations()
            .map(|animation| match animation.name() {
                Some(name) => AnimationClip::new(name),
                None => AnimationClip::new(format!("Animation {}", animation.index())),
            })
            .collect();

        let graph = SceneGraph::new(root);
        tracing::info!(
            scene = %graph.id(),
            nodes = graph.node_count(),
            "parsed glTF document"
        );
        Ok(LoadedModel::new(graph).with_animations(animations))
    }
}

#[async_trait]
impl ModelLoader for GltfLoader {
    async fn load(&self, bytes: Arc<[u8]>, format: ModelFormat) -> Result<LoadedModel, LoadError> {
        tracing::debug!(%format, bytes = bytes.len(), "loading model");
        tokio::task::spawn_blocking(move || Self::parse(&bytes))
            .await
            .map_err(|err| LoadError::Parse(err.to_string()))?
    }
}

struct Builder {
    joints: HashSet<usize>,
    names: HashMap<String, usize>,
}

impl Builder {
    fn node(&mut self, node: &gltf::Node<'_>) -> SceneNode {
        let (translation, rotation, scale) = node.transform().decomposed();
        let transform = Transform::from_trs(translation, rotation, scale);
        let name = node.name().map(|n| self.unique(n));

        let kind = if self.joints.contains(&node.index()) {
            NodeKind::Bone
        } else if let Some(camera) = node.camera() {
            match camera.projection() {
                Projection::Perspective(_) => NodeKind::PerspectiveCamera,
                Projection::Orthographic(_) => NodeKind::OrthographicCamera,
            }
        } else if node.mesh().is_some() {
            if node.skin().is_some() {
                NodeKind::SkinnedMesh
            } else {
                NodeKind::Mesh
            }
        } else {
            NodeKind::Object3D
        };

        let mut out = match (kind, node.mesh()) {
            (NodeKind::Mesh | NodeKind::SkinnedMesh, Some(mesh)) => self.mesh(kind, name, &mesh),
            _ => named(kind, name),
        };
        out.transform = transform;
        for child in node.children() {
            out = out.with_child(self.node(&child));
        }
        out
    }

    /// One primitive becomes one mesh; several become a group of meshes
    fn mesh(&mut self, kind: NodeKind, name: Option<String>, mesh: &gltf::Mesh<'_>) -> SceneNode {
        let geometry = mesh
            .name()
            .map_or_else(|| format!("mesh_{}", mesh.index()), sanitize);
        let primitives: Vec<_> = mesh.primitives().collect();

        if let [primitive] = primitives.as_slice() {
            let mut node = named(kind, name);
            node.mesh = Some(MeshBinding::new(geometry, material_name(primitive)));
            return node;
        }

        let mut group = named(NodeKind::Group, name.clone());
        for (i, primitive) in primitives.iter().enumerate() {
            let child_name = name.as_ref().map(|n| self.unique(&format!("{n}_{i}")));
            let mut child = named(kind, child_name);
            child.mesh = Some(MeshBinding::new(
                format!("{geometry}_{i}"),
                material_name(primitive),
            ));
            group = group.with_child(child);
        }
        group
    }

    /// Sanitized name, suffixed `_n` when already taken
    fn unique(&mut self, raw: &str) -> String {
        let base = sanitize(raw);
        let seen = self.names.entry(base.clone()).or_insert(0);
        let name = if *seen == 0 {
            base
        } else {
            format!("{base}_{seen}")
        };
        *seen += 1;
        name
    }
}

fn named(kind: NodeKind, name: Option<String>) -> SceneNode {
    match name {
        Some(name) if !name.is_empty() => SceneNode::named(kind, name),
        _ => SceneNode::new(kind),
    }
}

fn material_name(primitive: &gltf::Primitive<'_>) -> Option<String> {
    let material = primitive.material();
    match (material.name(), material.index()) {
        (Some(name), _) => Some(sanitize(name)),
        (None, Some(index)) => Some(format!("material_{index}")),
        (None, None) => None,
    }
}

/// Whitespace to `_`, reserved path characters `[ ] . : /` dropped
fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '[' | ']' | '.' | ':' | '/'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
