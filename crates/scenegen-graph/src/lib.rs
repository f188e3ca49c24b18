//! scenegen Scene Graph
//!
//! The in-memory scene model the reconciliation engine edits.
//!
//! # Core Concepts
//!
//! - [`SceneGraph`]: a root [`SceneNode`] plus a [`SceneId`] identity
//! - [`SceneNode`]: kind, render flags, render order, transform, mesh binding
//! - [`Property`] / [`PropertyValue`]: the fixed set of editable properties
//! - [`LoadedModel`]: a parsed scene plus its animation clips
//!
//! # Example
//!
//! ```rust
//! use scenegen_graph::{MeshBinding, NodeKind, Property, SceneGraph, SceneNode};
//!
//! let mut scene = SceneGraph::new(
//!     SceneNode::new(NodeKind::Group)
//!         .with_child(SceneNode::mesh("Cube", MeshBinding::new("Cube", None))),
//! );
//! scene.traverse_mut(|node| {
//!     node.ensure_name();
//! });
//! let cube = scene.find_by_name("Cube")[0];
//! assert_eq!(cube.get(Property::Visible).as_bool(), Some(true));
//! ```

#![warn(unreachable_pub)]

mod graph;
mod id;
mod node;
mod property;

// Re-exports
pub use graph::{AnimationClip, LoadedModel, SceneGraph};
pub use id::{NodeId, SceneId};
pub use node::{MeshBinding, NodeKind, RenderFlags, SceneNode, Transform};
pub use property::{NumericRange, Property, PropertyError, PropertyKind, PropertyValue};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
