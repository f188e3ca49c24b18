//! Control schema synthesis
//!
//! Turns a [`NodePropertyIndex`] into the nested folder-of-controls shape a
//! UI renders: one collapsed group per node name.

use crate::index::{NodePropertyIndex, PropertyDescriptor};
use crate::key::PropertyKey;
use indexmap::IndexMap;
use scenegen_graph::{NumericRange, PropertyValue, SceneGraph, SceneId};
use serde::Serialize;
use std::sync::Arc;

/// Input widget for one control
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlInput {
    /// Checkbox
    Toggle {
        /// Current state
        value: bool,
    },
    /// Bounded slider
    Slider {
        /// Current value
        value: f64,
        /// Bounds and step
        #[serde(flatten)]
        range: NumericRange,
    },
}

/// One control in a group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    /// Routing key
    pub key: PropertyKey,
    /// Label (property name)
    pub label: String,
    /// Hint (synthetic key)
    pub hint: String,
    /// Widget and current value
    pub input: ControlInput,
}

impl Control {
    fn from_descriptor(descriptor: &PropertyDescriptor) -> Self {
        let input = match (descriptor.value, descriptor.range) {
            (PropertyValue::Number(value), range) => ControlInput::Slider {
                value,
                range: range.unwrap_or(NumericRange::RENDER_ORDER),
            },
            (PropertyValue::Bool(value), _) => ControlInput::Toggle { value },
        };
        Self {
            key: descriptor.key,
            label: descriptor.property.to_string(),
            hint: descriptor.synthetic_key.clone(),
            input,
        }
    }
}

/// Folder of controls for one node name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlGroup {
    /// Node name
    pub name: String,
    /// Folder starts collapsed
    pub collapsed: bool,
    /// Controls, in index order
    pub controls: Vec<Control>,
}

/// Nested control schema for one scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSchema {
    scene: SceneId,
    groups: IndexMap<String, ControlGroup>,
}

impl ControlSchema {
    /// Synthesize a schema from an index
    ///
    /// Returns `None` when the index was not built from a scene. Nodes
    /// sharing a name share one group; their controls stay apart by key.
    #[must_use]
    pub fn synthesize(index: &NodePropertyIndex) -> Option<Self> {
        let scene = index.scene()?;
        let mut groups: IndexMap<String, ControlGroup> = IndexMap::new();
        for descriptor in index {
            groups
                .entry(descriptor.node_name.clone())
                .or_insert_with(|| ControlGroup {
                    name: descriptor.node_name.clone(),
                    collapsed: true,
                    controls: Vec::new(),
                })
                .controls
                .push(Control::from_descriptor(descriptor));
        }
        Some(Self { scene, groups })
    }

    /// Scene this schema describes
    #[inline]
    #[must_use]
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    /// Group for a node name
    #[inline]
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&ControlGroup> {
        self.groups.get(name)
    }

    /// Groups in traversal order
    pub fn groups(&self) -> impl Iterator<Item = &ControlGroup> + '_ {
        self.groups.values()
    }

    /// Number of groups
    #[inline]
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Every control
    pub fn controls(&self) -> impl Iterator<Item = &Control> + '_ {
        self.groups.values().flat_map(|g| g.controls.iter())
    }

    /// Structured keys of every control carrying a synthetic key
    #[must_use]
    pub fn resolve(&self, synthetic: &str) -> Vec<PropertyKey> {
        self.controls()
            .filter(|c| c.hint == synthetic)
            .map(|c| c.key)
            .collect()
    }
}

/// Memoizes the schema per scene identity
///
/// Hands back the same `Arc` while the scene id is unchanged and synthesizes
/// a fresh schema as soon as it differs. Property edits on the same scene do
/// not invalidate it.
#[derive(Debug, Default)]
pub struct SchemaCache {
    current: Option<Arc<ControlSchema>>,
}

impl SchemaCache {
    /// Create empty cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema for the given scene, if any
    ///
    /// Indexing (and therefore node naming) only happens on a cache miss.
    pub fn schema_for(&mut self, scene: Option<&mut SceneGraph>) -> Option<Arc<ControlSchema>> {
        let Some(scene) = scene else {
            self.current = None;
            return None;
        };
        if let Some(current) = &self.current {
            if current.scene() == scene.id() {
                return Some(Arc::clone(current));
            }
        }
        let index = NodePropertyIndex::build(Some(scene));
        let schema = ControlSchema::synthesize(&index).map(Arc::new);
        tracing::debug!(
            groups = schema.as_ref().map_or(0, |s| s.group_count()),
            "synthesized control schema"
        );
        self.current = schema.clone();
        schema
    }

    /// Drop the cached schema
    #[inline]
    pub fn clear(&mut self) {
        self.current = None;
    }
}
