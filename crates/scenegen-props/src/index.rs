//! Node property index
//!
//! Provides [`NodePropertyIndex`], the flat per-node listing of editable
//! properties derived from a live scene graph.

use crate::key::{PropertyKey, SyntheticKey};
use indexmap::IndexMap;
use scenegen_graph::{
    NodeId, NumericRange, Property, PropertyKind, PropertyValue, SceneGraph, SceneId,
};
use serde::Serialize;

/// One editable property of one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    /// Structured routing key
    pub key: PropertyKey,
    /// `property:nodeName` string shown as the control hint
    pub synthetic_key: String,
    /// Owning node name at index time
    pub node_name: String,
    /// Property
    pub property: Property,
    /// Boolean or number
    pub kind: PropertyKind,
    /// Value read from the node
    pub value: PropertyValue,
    /// Bounds, for numeric properties
    pub range: Option<NumericRange>,
}

/// Index of every editable property in a scene, in traversal order
///
/// Building the index names anonymous nodes as a side effect; see
/// [`NodePropertyIndex::build`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePropertyIndex {
    scene: Option<SceneId>,
    entries: IndexMap<PropertyKey, PropertyDescriptor>,
}

impl NodePropertyIndex {
    /// Create empty index
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a scene graph
    ///
    /// Walks the graph depth-first, naming every unnamed node
    /// `"{type}: {id}"` before reading its properties. Names already present
    /// are never touched, so re-indexing is a no-op on names. `None` yields an
    /// empty index.
    pub fn build(scene: Option<&mut SceneGraph>) -> Self {
        let Some(scene) = scene else {
            return Self::new();
        };

        let mut entries = IndexMap::new();
        let mut named = 0usize;
        scene.traverse_mut(|node| {
            if node.ensure_name() {
                named += 1;
            }
            for property in Property::ALL {
                let key = PropertyKey::new(node.id(), property);
                entries.insert(
                    key,
                    PropertyDescriptor {
                        key,
                        synthetic_key: SyntheticKey::new(property, node.name()).to_string(),
                        node_name: node.name().to_string(),
                        property,
                        kind: property.kind(),
                        value: node.get(property),
                        range: property.range(),
                    },
                );
            }
        });

        tracing::debug!(
            scene = %scene.id(),
            properties = entries.len(),
            named,
            "indexed scene properties"
        );

        Self {
            scene: Some(scene.id()),
            entries,
        }
    }

    /// Scene this index was built from
    #[inline]
    #[must_use]
    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    /// Number of descriptors
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Descriptor for a structured key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.entries.get(key)
    }

    /// Descriptors carrying the given synthetic key
    ///
    /// More than one when several nodes share a name.
    pub fn by_synthetic<'a>(
        &'a self,
        synthetic: &'a str,
    ) -> impl Iterator<Item = &'a PropertyDescriptor> + 'a {
        self.entries
            .values()
            .filter(move |d| d.synthetic_key == synthetic)
    }

    /// Descriptors of one node
    pub fn for_node(&self, node: NodeId) -> impl Iterator<Item = &PropertyDescriptor> + '_ {
        self.entries.values().filter(move |d| d.key.node == node)
    }

    /// All descriptors in traversal order
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor> + '_ {
        self.entries.values()
    }
}

impl<'a> IntoIterator for &'a NodePropertyIndex {
    type Item = &'a PropertyDescriptor;
    type IntoIter = indexmap::map::Values<'a, PropertyKey, PropertyDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
