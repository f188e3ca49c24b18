//! Property patching
//!
//! Writes edited values back onto live scene-graph nodes, in place.
//!
//! Two entry points:
//! - [`PropertyPatcher::apply`] routes by [`PropertyKey`] (node id), used for
//!   the engine's own snapshots.
//! - [`PropertyPatcher::apply_synthetic`] routes string-keyed batches by node
//!   name using [`match_node`].
//!
//! Neither raises: unroutable keys and kind mismatches are skipped and counted.

use crate::key::{match_node, NodeMatch, PropertyKey};
use crate::snapshot::PropertySnapshot;
use indexmap::IndexMap;
use scenegen_graph::{NodeId, Property, PropertyValue, SceneGraph};
use std::collections::HashMap;

/// String-keyed edit batch, `property:nodeName` → value
pub type SyntheticBatch = IndexMap<String, PropertyValue>;

/// What a patch pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Values written onto nodes
    pub applied: usize,
    /// Edits dropped (unknown node, unknown property, kind mismatch)
    pub skipped: usize,
    /// Anonymous nodes named during the pass
    pub named: usize,
}

/// Applies edits onto a scene graph
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyPatcher;

impl PropertyPatcher {
    /// Create patcher
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Apply structured edits, routed by node id
    ///
    /// Name collisions cannot misroute these. No-op without a scene.
    pub fn apply<I>(&self, scene: Option<&mut SceneGraph>, edits: I) -> PatchReport
    where
        I: IntoIterator<Item = (PropertyKey, PropertyValue)>,
    {
        let mut report = PatchReport::default();
        let Some(scene) = scene else {
            return report;
        };

        let mut by_node: HashMap<NodeId, Vec<(Property, PropertyValue)>> = HashMap::new();
        for (key, value) in edits {
            by_node.entry(key.node).or_default().push((key.property, value));
        }
        let total: usize = by_node.values().map(Vec::len).sum();

        scene.traverse_mut(|node| {
            let Some(edits) = by_node.remove(&node.id()) else {
                return;
            };
            for (property, value) in edits {
                match node.set(property, value) {
                    Ok(()) => report.applied += 1,
                    Err(err) => {
                        tracing::debug!(node = %node.name(), %err, "skipped edit");
                    }
                }
            }
        });

        report.skipped = total - report.applied;
        tracing::debug!(applied = report.applied, skipped = report.skipped, "patched scene");
        report
    }

    /// Apply every value of a snapshot
    pub fn apply_snapshot(
        &self,
        scene: Option<&mut SceneGraph>,
        snapshot: &PropertySnapshot,
    ) -> PatchReport {
        if let Some(scene) = &scene {
            if scene.id() != snapshot.scene() {
                tracing::debug!(
                    scene = %scene.id(),
                    snapshot = %snapshot.scene(),
                    "snapshot belongs to another scene"
                );
            }
        }
        self.apply(scene, snapshot.iter().map(|(k, v)| (*k, *v)))
    }

    /// Apply a string-keyed batch, routed by node name
    ///
    /// For every named node and every key, `":{nodeName}"` is stripped from
    /// the key; a remainder that still holds a separator belongs to another
    /// node, a remainder naming a property is written. Unnamed nodes are named
    /// during the pass and left unpatched until the next one. No-op without a
    /// scene.
    pub fn apply_synthetic(
        &self,
        scene: Option<&mut SceneGraph>,
        batch: &SyntheticBatch,
    ) -> PatchReport {
        let mut report = PatchReport::default();
        let Some(scene) = scene else {
            return report;
        };

        let mut routed = vec![false; batch.len()];
        scene.traverse_mut(|node| {
            if node.ensure_name() {
                report.named += 1;
                return;
            }
            for (slot, (key, value)) in batch.iter().enumerate() {
                match match_node(key, node.name()) {
                    NodeMatch::Property(property) => match node.set(property, *value) {
                        Ok(()) => {
                            report.applied += 1;
                            routed[slot] = true;
                        }
                        Err(err) => tracing::debug!(key = %key, %err, "skipped edit"),
                    },
                    NodeMatch::Unknown(remainder) => {
                        tracing::debug!(key = %key, node = %node.name(), %remainder, "no such property");
                    }
                    NodeMatch::Foreign => {}
                }
            }
        });

        report.skipped = routed.iter().filter(|hit| !**hit).count();
        tracing::debug!(
            applied = report.applied,
            skipped = report.skipped,
            named = report.named,
            "patched scene from synthetic keys"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::NodePropertyIndex;
    use scenegen_graph::{NodeKind, SceneNode};

    fn pair() -> (SceneGraph, NodeId, NodeId) {
        let scene = SceneGraph::new(
            SceneNode::named(NodeKind::Group, "root")
                .with_child(SceneNode::named(NodeKind::Mesh, "A"))
                .with_child(SceneNode::named(NodeKind::Mesh, "A:extra")),
        );
        let a = scene.root().children()[0].id();
        let extra = scene.root().children()[1].id();
        (scene, a, extra)
    }

    fn batch(entries: &[(&str, PropertyValue)]) -> SyntheticBatch {
        entries.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn no_scene_is_noop() {
        let patcher = PropertyPatcher::new();
        assert_eq!(patcher.apply(None, Vec::new()), PatchReport::default());
        let b = batch(&[("visible:A", false.into())]);
        assert_eq!(patcher.apply_synthetic(None, &b), PatchReport::default());
    }

    #[test]
    fn structured_edits_route_by_id() {
        let (mut scene, a, extra) = pair();
        let edits: [(PropertyKey, PropertyValue); 4] = [
            (PropertyKey::new(a, Property::Visible), false.into()),
            (PropertyKey::new(extra, Property::RenderOrder), 4.0.into()),
            (PropertyKey::new(extra, Property::CastShadow), 1.0.into()),
            (PropertyKey::new(NodeId::new(), Property::Visible), false.into()),
        ];
        let report = PropertyPatcher::new().apply(Some(&mut scene), edits);
        assert_eq!(report.applied, 2);
        assert_eq!(report.skipped, 2);
        assert!(!scene.find(a).unwrap().flags.visible);
        assert!(scene.find(extra).unwrap().flags.visible);
        assert_eq!(scene.find(extra).unwrap().render_order, 4.0);
    }

    #[test]
    fn synthetic_key_for_a_leaves_a_extra_alone() {
        let (mut scene, a, extra) = pair();
        let report = PropertyPatcher::new()
            .apply_synthetic(Some(&mut scene), &batch(&[("visible:A", false.into())]));

        assert_eq!(report.applied, 1);
        assert!(!scene.find(a).unwrap().flags.visible);
        assert!(scene.find(extra).unwrap().flags.visible);
    }

    #[test]
    fn synthetic_key_for_a_extra_leaves_a_alone() {
        let (mut scene, a, extra) = pair();
        PropertyPatcher::new()
            .apply_synthetic(Some(&mut scene), &batch(&[("castShadow:A:extra", true.into())]));

        assert!(!scene.find(a).unwrap().flags.cast_shadow);
        assert!(scene.find(extra).unwrap().flags.cast_shadow);
    }

    #[test]
    fn prefix_sharing_names_are_not_cross_applied() {
        let mut scene = SceneGraph::new(
            SceneNode::named(NodeKind::Group, "root")
                .with_child(SceneNode::named(NodeKind::Mesh, "A"))
                .with_child(SceneNode::named(NodeKind::Mesh, "Ax")),
        );
        let a = scene.root().children()[0].id();
        let ax = scene.root().children()[1].id();

        // stripping ":A" from "visible:Ax" leaves "visiblex" on node A
        let report = PropertyPatcher::new()
            .apply_synthetic(Some(&mut scene), &batch(&[("visible:Ax", false.into())]));

        assert_eq!(report.applied, 1);
        assert!(scene.find(a).unwrap().flags.visible);
        assert!(!scene.find(ax).unwrap().flags.visible);
    }

    #[test]
    fn shared_names_both_receive_synthetic_edits() {
        let mut scene = SceneGraph::new(
            SceneNode::named(NodeKind::Group, "root")
                .with_child(SceneNode::named(NodeKind::Mesh, "Twin"))
                .with_child(SceneNode::named(NodeKind::Mesh, "Twin")),
        );
        let report = PropertyPatcher::new()
            .apply_synthetic(Some(&mut scene), &batch(&[("visible:Twin", false.into())]));
        assert_eq!(report.applied, 2);
        assert!(scene.root().children().iter().all(|n| !n.flags.visible));
    }

    #[test]
    fn unnamed_nodes_are_named_not_patched() {
        let mut scene = SceneGraph::new(SceneNode::new(NodeKind::Mesh));
        let id = scene.root().id();
        let key = format!("visible:Mesh: {id}");
        let b = batch(&[(key.as_str(), false.into())]);

        let first = PropertyPatcher::new().apply_synthetic(Some(&mut scene), &b);
        assert_eq!(first.named, 1);
        assert_eq!(first.applied, 0);
        assert!(scene.root().flags.visible);

        let second = PropertyPatcher::new().apply_synthetic(Some(&mut scene), &b);
        assert_eq!(second.applied, 1);
        assert!(!scene.root().flags.visible);
    }

    #[test]
    fn malformed_keys_are_skipped() {
        let (mut scene, _, _) = pair();
        let report = PropertyPatcher::new().apply_synthetic(
            Some(&mut scene),
            &batch(&[("nonsense", true.into()), ("opacity:A", 1.0.into()), ("visible:A", 3.0.into())]),
        );
        assert_eq!(report.applied, 0);
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn key_without_node_name_touches_nothing() {
        let mut scene = SceneGraph::new(
            SceneNode::named(NodeKind::Group, "root")
                .with_child(SceneNode::named(NodeKind::Mesh, "A"))
                .with_child(SceneNode::named(NodeKind::Mesh, "B")),
        );
        let report = PropertyPatcher::new()
            .apply_synthetic(Some(&mut scene), &batch(&[("visible", false.into())]));
        assert_eq!(report.applied, 0);
        assert_eq!(report.skipped, 1);
        let mut hidden = 0;
        scene.traverse(|node| {
            if node.get(Property::Visible) != PropertyValue::Bool(true) {
                hidden += 1;
            }
        });
        assert_eq!(hidden, 0);
    }

    #[test]
    fn snapshot_round_trip() {
        let (mut scene, a, _) = pair();
        let index = NodePropertyIndex::build(Some(&mut scene));
        let mut snapshot = PropertySnapshot::from_index(&index).unwrap();
        snapshot.set(PropertyKey::new(a, Property::ReceiveShadow), true.into()).unwrap();

        let report = PropertyPatcher::new().apply_snapshot(Some(&mut scene), &snapshot);
        assert_eq!(report.applied, snapshot.len());
        assert!(scene.find(a).unwrap().flags.receive_shadow);
    }
}
