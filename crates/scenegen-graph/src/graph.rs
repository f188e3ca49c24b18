//! Scene graphs and loaded models

use crate::id::{NodeId, SceneId};
use crate::node::SceneNode;
use serde::{Deserialize, Serialize};

/// A scene graph: one root node plus a scene identity
///
/// Cloning keeps the [`SceneId`] (a clone is the same scene); use
/// [`SceneGraph::new`] to mint a new identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    id: SceneId,
    root: SceneNode,
}

impl SceneGraph {
    /// Wrap a root node in a new scene identity
    #[must_use]
    pub fn new(root: SceneNode) -> Self {
        Self {
            id: SceneId::new(),
            root,
        }
    }

    /// Scene identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Root node
    #[inline]
    #[must_use]
    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    /// Mutable root node
    #[inline]
    pub fn root_mut(&mut self) -> &mut SceneNode {
        &mut self.root
    }

    /// Depth-first pre-order traversal
    pub fn traverse<'a>(&'a self, mut f: impl FnMut(&'a SceneNode)) {
        self.root.visit(&mut f);
    }

    /// Depth-first pre-order traversal with mutable access
    pub fn traverse_mut(&mut self, mut f: impl FnMut(&mut SceneNode)) {
        self.root.visit_mut(&mut f);
    }

    /// Total number of nodes, root included
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.traverse(|_| count += 1);
        count
    }

    /// Find a node by id
    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&SceneNode> {
        let mut found = None;
        self.traverse(|node| {
            if found.is_none() && node.id() == id {
                found = Some(node);
            }
        });
        found
    }

    /// Find a node by id, mutably
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        fn walk(node: &mut SceneNode, id: NodeId) -> Option<&mut SceneNode> {
            if node.id() == id {
                return Some(node);
            }
            node.children_mut().iter_mut().find_map(|child| walk(child, id))
        }
        walk(&mut self.root, id)
    }

    /// All nodes carrying the given display name, in traversal order
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Vec<&SceneNode> {
        let mut matches = Vec::new();
        self.traverse(|node| {
            if node.name() == name {
                matches.push(node);
            }
        });
        matches
    }
}

/// A named animation clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Clip name (`"Animation {index}"` when the source has none)
    pub name: String,
}

impl AnimationClip {
    /// Create clip
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Result of parsing a model file
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    /// Parsed scene
    pub scene: SceneGraph,
    /// Animation clips found in the file
    pub animations: Vec<AnimationClip>,
}

impl LoadedModel {
    /// Create model without animations
    #[inline]
    #[must_use]
    pub fn new(scene: SceneGraph) -> Self {
        Self {
            scene,
            animations: Vec::new(),
        }
    }

    /// Builder: attach animation clips
    #[inline]
    #[must_use]
    pub fn with_animations(mut self, animations: Vec<AnimationClip>) -> Self {
        self.animations = animations;
        self
    }

    /// Whether the model carries any animation
    #[inline]
    #[must_use]
    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{MeshBinding, NodeKind};

    fn sample() -> SceneGraph {
        SceneGraph::new(
            SceneNode::named(NodeKind::Group, "Scene")
                .with_child(SceneNode::mesh("Cube", MeshBinding::new("Cube", None)))
                .with_child(
                    SceneNode::named(NodeKind::Group, "Rig")
                        .with_child(SceneNode::mesh("Cube", MeshBinding::new("Cube_1", None))),
                ),
        )
    }

    #[test]
    fn counts_every_node() {
        assert_eq!(sample().node_count(), 4);
    }

    #[test]
    fn clone_keeps_identity() {
        let scene = sample();
        assert_eq!(scene.clone().id(), scene.id());
        assert_ne!(sample().id(), scene.id());
    }

    #[test]
    fn find_by_id_and_name() {
        let mut scene = sample();
        let cubes: Vec<_> = scene.find_by_name("Cube").iter().map(|n| n.id()).collect();
        assert_eq!(cubes.len(), 2);

        assert_eq!(scene.find(cubes[1]).map(SceneNode::name), Some("Cube"));
        scene.find_mut(cubes[1]).unwrap().flags.visible = false;
        assert!(scene.find(cubes[0]).unwrap().flags.visible);
        assert!(!scene.find(cubes[1]).unwrap().flags.visible);
    }

    #[test]
    fn animation_presence() {
        let model = LoadedModel::new(sample());
        assert!(!model.has_animations());
        let model = model.with_animations(vec![AnimationClip::new("Walk")]);
        assert!(model.has_animations());
    }
}
