//! Scene nodes
//!
//! A [`SceneNode`] owns its children; the whole tree is owned by a
//! [`SceneGraph`](crate::SceneGraph).

use crate::id::NodeId;
use crate::property::{Property, PropertyError, PropertyValue};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Runtime type of a node, named after the three.js class it becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Plain grouping node
    Group,
    /// Node without content (transform only)
    Object3D,
    /// Renderable mesh
    Mesh,
    /// Mesh bound to a skeleton
    SkinnedMesh,
    /// Skeleton joint
    Bone,
    /// Perspective camera
    PerspectiveCamera,
    /// Orthographic camera
    OrthographicCamera,
}

impl NodeKind {
    /// Class name, used when naming anonymous nodes
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Object3D => "Object3D",
            Self::Mesh => "Mesh",
            Self::SkinnedMesh => "SkinnedMesh",
            Self::Bone => "Bone",
            Self::PerspectiveCamera => "PerspectiveCamera",
            Self::OrthographicCamera => "OrthographicCamera",
        }
    }

    /// Whether the node draws geometry
    #[inline]
    #[must_use]
    pub const fn is_mesh(self) -> bool {
        matches!(self, Self::Mesh | Self::SkinnedMesh)
    }

    /// Whether the node is a camera
    #[inline]
    #[must_use]
    pub const fn is_camera(self) -> bool {
        matches!(self, Self::PerspectiveCamera | Self::OrthographicCamera)
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Boolean render flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderFlags {
    /// Frustum culling enabled
    pub frustum_culled: bool,
    /// Rendered at all
    pub visible: bool,
    /// Casts shadows
    pub cast_shadow: bool,
    /// Receives shadows
    pub receive_shadow: bool,
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self {
            frustum_culled: true,
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

/// Local transform: position, Euler XYZ rotation (radians), scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation
    pub position: [f32; 3],
    /// Euler angles, XYZ order
    pub rotation: [f32; 3],
    /// Per-axis scale
    pub scale: [f32; 3],
}

impl Transform {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        position: [0.0; 3],
        rotation: [0.0; 3],
        scale: [1.0; 3],
    };

    /// Build from translation, unit quaternion `[x, y, z, w]` and scale
    #[must_use]
    pub fn from_trs(position: [f32; 3], quaternion: [f32; 4], scale: [f32; 3]) -> Self {
        Self {
            position,
            rotation: euler_xyz(quaternion),
            scale,
        }
    }

    /// Whether every component is at its identity value
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.position == [0.0; 3] && self.rotation == [0.0; 3] && self.scale == [1.0; 3]
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Same decomposition three.js uses for Euler order 'XYZ'.
fn euler_xyz([x, y, z, w]: [f32; 4]) -> [f32; 3] {
    let m11 = 1.0 - 2.0 * (y * y + z * z);
    let m12 = 2.0 * (x * y - z * w);
    let m13 = 2.0 * (x * z + y * w);
    let m22 = 1.0 - 2.0 * (x * x + z * z);
    let m23 = 2.0 * (y * z - x * w);
    let m32 = 2.0 * (y * z + x * w);
    let m33 = 1.0 - 2.0 * (x * x + y * y);

    let ry = m13.clamp(-1.0, 1.0).asin();
    if m13.abs() < 0.999_999_9 {
        [(-m23).atan2(m33), ry, (-m12).atan2(m11)]
    } else {
        [m32.atan2(m22), ry, 0.0]
    }
}

/// Geometry and material a mesh node draws with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshBinding {
    /// Geometry name (shared between instances)
    pub geometry: String,
    /// Material name, if the material is named
    pub material: Option<String>,
}

impl MeshBinding {
    /// Create binding
    #[inline]
    #[must_use]
    pub fn new(geometry: impl Into<String>, material: Option<String>) -> Self {
        Self {
            geometry: geometry.into(),
            material,
        }
    }
}

/// A node in the scene graph
///
/// `name` is empty until either the loader supplies one or the property
/// index assigns `"{type}: {id}"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    id: NodeId,
    name: String,
    kind: NodeKind,
    /// Render flags
    pub flags: RenderFlags,
    /// Draw order override
    pub render_order: f64,
    /// Local transform
    pub transform: Transform,
    /// Mesh content, for mesh kinds
    pub mesh: Option<MeshBinding>,
    children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create an unnamed node with default flags
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId::new(),
            name: String::new(),
            kind,
            flags: RenderFlags::default(),
            render_order: 0.0,
            transform: Transform::IDENTITY,
            mesh: None,
            children: Vec::new(),
        }
    }

    /// Create a named node
    #[must_use]
    pub fn named(kind: NodeKind, name: impl Into<String>) -> Self {
        let mut node = Self::new(kind);
        node.name = name.into();
        node
    }

    /// Create a named mesh node
    #[must_use]
    pub fn mesh(name: impl Into<String>, binding: MeshBinding) -> Self {
        let mut node = Self::named(NodeKind::Mesh, name);
        node.mesh = Some(binding);
        node
    }

    /// Builder: append a child
    #[must_use]
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: set transform
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Stable id
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display name (possibly empty)
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a name has been assigned
    #[inline]
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// Replace the display name
    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Name this node `"{type}: {id}"` unless it already has a name
    ///
    /// Returns `true` if a name was assigned.
    pub fn ensure_name(&mut self) -> bool {
        if self.is_named() {
            return false;
        }
        self.name = format!("{}: {}", self.kind.type_name(), self.id);
        tracing::debug!(node = %self.id, name = %self.name, "assigned node name");
        true
    }

    /// Node kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Children in order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Mutable children
    #[inline]
    pub fn children_mut(&mut self) -> &mut Vec<SceneNode> {
        &mut self.children
    }

    /// Read an editable property
    #[must_use]
    pub fn get(&self, property: Property) -> PropertyValue {
        match property {
            Property::FrustumCulled => PropertyValue::Bool(self.flags.frustum_culled),
            Property::Visible => PropertyValue::Bool(self.flags.visible),
            Property::CastShadow => PropertyValue::Bool(self.flags.cast_shadow),
            Property::ReceiveShadow => PropertyValue::Bool(self.flags.receive_shadow),
            Property::RenderOrder => PropertyValue::Number(self.render_order),
        }
    }

    /// Write an editable property
    ///
    /// # Errors
    /// Returns [`PropertyError::TypeMismatch`] if the value kind does not fit
    pub fn set(&mut self, property: Property, value: PropertyValue) -> Result<(), PropertyError> {
        let mismatch = || PropertyError::TypeMismatch {
            property,
            expected: property.kind(),
            actual: value.kind(),
        };
        let flag = match property {
            Property::RenderOrder => {
                self.render_order = value.as_number().ok_or_else(mismatch)?;
                return Ok(());
            }
            Property::FrustumCulled => &mut self.flags.frustum_culled,
            Property::Visible => &mut self.flags.visible,
            Property::CastShadow => &mut self.flags.cast_shadow,
            Property::ReceiveShadow => &mut self.flags.receive_shadow,
        };
        *flag = value.as_bool().ok_or_else(mismatch)?;
        Ok(())
    }

    /// Depth-first pre-order visit
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a SceneNode)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    /// Depth-first pre-order visit with mutable access
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut SceneNode)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }
}
