//! Property snapshots
//!
//! [`PropertySnapshot`] holds the values a UI currently shows for every
//! control. Each accepted edit bumps its revision; a different revision is
//! what "the UI handed us a new snapshot" means to the change detector.

use crate::index::NodePropertyIndex;
use crate::key::PropertyKey;
use indexmap::IndexMap;
use scenegen_graph::{PropertyError, PropertyValue, SceneId};

/// Revision counter of a snapshot
pub type Revision = u64;

/// Edited control values for one scene
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySnapshot {
    scene: SceneId,
    revision: Revision,
    values: IndexMap<PropertyKey, PropertyValue>,
}

impl PropertySnapshot {
    /// Seed a snapshot from the current node values
    ///
    /// Returns `None` for an index without a scene.
    #[must_use]
    pub fn from_index(index: &NodePropertyIndex) -> Option<Self> {
        let scene = index.scene()?;
        let values = index.iter().map(|d| (d.key, d.value)).collect();
        Some(Self {
            scene,
            revision: 0,
            values,
        })
    }

    /// Scene the values belong to
    #[inline]
    #[must_use]
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    /// Current revision
    #[inline]
    #[must_use]
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Value of one control
    #[inline]
    #[must_use]
    pub fn get(&self, key: &PropertyKey) -> Option<PropertyValue> {
        self.values.get(key).copied()
    }

    /// Every value in index order
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &PropertyValue)> + '_ {
        self.values.iter()
    }

    /// Number of controls
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no controls
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Record an edit
    ///
    /// Numeric values are clamped into the property's range, as a slider
    /// would. The revision only moves when the stored value changes.
    ///
    /// # Errors
    /// Returns [`SnapshotError::UnknownKey`] for keys outside this snapshot and
    /// [`SnapshotError::Property`] when the value kind does not fit.
    pub fn set(&mut self, key: PropertyKey, value: PropertyValue) -> Result<bool, SnapshotError> {
        let property = key.property;
        let slot = self
            .values
            .get_mut(&key)
            .ok_or(SnapshotError::UnknownKey(key))?;
        if value.kind() != property.kind() {
            return Err(SnapshotError::Property(PropertyError::TypeMismatch {
                property,
                expected: property.kind(),
                actual: value.kind(),
            }));
        }
        let value = match (value, property.range()) {
            (PropertyValue::Number(n), Some(range)) => PropertyValue::Number(range.clamp(n)),
            (other, _) => other,
        };
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        self.revision += 1;
        Ok(true)
    }
}

/// Snapshot edit errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    /// Key is not part of the snapshot
    #[error("no control for {0}")]
    UnknownKey(PropertyKey),

    /// Value does not fit the property
    #[error(transparent)]
    Property(#[from] PropertyError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenegen_graph::{NodeKind, Property, SceneGraph, SceneNode};

    fn snapshot() -> (PropertySnapshot, PropertyKey) {
        let mut scene = SceneGraph::new(SceneNode::named(NodeKind::Mesh, "Cube"));
        let id = scene.root().id();
        let index = NodePropertyIndex::build(Some(&mut scene));
        (
            PropertySnapshot::from_index(&index).unwrap(),
            PropertyKey::new(id, Property::Visible),
        )
    }

    #[test]
    fn seeded_from_index() {
        let (snap, key) = snapshot();
        assert_eq!(snap.revision(), 0);
        assert_eq!(snap.len(), 5);
        assert_eq!(snap.get(&key), Some(PropertyValue::Bool(true)));
    }

    #[test]
    fn edits_bump_revision_only_on_change() {
        let (mut snap, key) = snapshot();
        assert_eq!(snap.set(key, true.into()), Ok(false));
        assert_eq!(snap.revision(), 0);
        assert_eq!(snap.set(key, false.into()), Ok(true));
        assert_eq!(snap.revision(), 1);
        assert_eq!(snap.get(&key), Some(PropertyValue::Bool(false)));
    }

    #[test]
    fn numeric_edits_are_clamped() {
        let (mut snap, key) = snapshot();
        let order = PropertyKey::new(key.node, Property::RenderOrder);
        snap.set(order, 5000.0.into()).unwrap();
        assert_eq!(snap.get(&order), Some(PropertyValue::Number(1000.0)));
    }

    #[test]
    fn rejects_unknown_keys_and_kinds() {
        let (mut snap, key) = snapshot();
        let stranger = PropertyKey::new(scenegen_graph::NodeId::new(), Property::Visible);
        assert!(matches!(snap.set(stranger, true.into()), Err(SnapshotError::UnknownKey(_))));
        assert!(matches!(snap.set(key, 1.0.into()), Err(SnapshotError::Property(_))));
        assert_eq!(snap.revision(), 0);
    }
}
