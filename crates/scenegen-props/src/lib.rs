//! scenegen Properties
//!
//! Per-node property controls over a live scene graph.
//!
//! # Overview
//!
//! - **NodePropertyIndex**: every editable property of every node, naming
//!   anonymous nodes on the way
//! - **ControlSchema**: the index folded into one collapsed group per node name,
//!   memoized per scene by **SchemaCache**
//! - **PropertySnapshot**: revisioned control values as a UI reports them
//! - **PropertyPatcher**: writes values back onto nodes by id, or by
//!   `property:nodeName` string key
//!
//! # Example
//!
//! ```rust
//! use scenegen_graph::{NodeKind, Property, SceneGraph, SceneNode};
//! use scenegen_props::{NodePropertyIndex, PropertyKey, PropertyPatcher, PropertySnapshot};
//!
//! let mut scene = SceneGraph::new(SceneNode::named(NodeKind::Mesh, "Cube"));
//! let cube = scene.root().id();
//!
//! let index = NodePropertyIndex::build(Some(&mut scene));
//! let mut snapshot = PropertySnapshot::from_index(&index).unwrap();
//! snapshot.set(PropertyKey::new(cube, Property::Visible), false.into()).unwrap();
//!
//! PropertyPatcher::new().apply_snapshot(Some(&mut scene), &snapshot);
//! assert!(!scene.root().flags.visible);
//! ```

#![warn(missing_docs)]

pub mod index;
pub mod key;
pub mod patch;
pub mod schema;
pub mod snapshot;

// Re-exports
pub use index::{NodePropertyIndex, PropertyDescriptor};
pub use key::{match_node, KeyError, NodeMatch, PropertyKey, SyntheticKey, SEPARATOR};
pub use patch::{PatchReport, PropertyPatcher, SyntheticBatch};
pub use schema::{Control, ControlGroup, ControlInput, ControlSchema, SchemaCache};
pub use snapshot::{PropertySnapshot, Revision, SnapshotError};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for property editing
    pub use crate::{
        ControlSchema, NodePropertyIndex, PatchReport, PropertyKey, PropertyPatcher,
        PropertySnapshot, SchemaCache, SyntheticBatch, SyntheticKey,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
