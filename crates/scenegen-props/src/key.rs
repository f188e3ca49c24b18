//! Property keys
//!
//! Two ways to address one control:
//!
//! - [`PropertyKey`]: structured `(NodeId, Property)` pair, immune to name
//!   collisions. The engine routes its own edits with it.
//! - [`SyntheticKey`]: the `property:nodeName` string a UI shows as a hint and
//!   sends back. Node names may themselves contain [`SEPARATOR`], so parsing
//!   anchors on the known property names instead of splitting.

use scenegen_graph::{NodeId, Property};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Separator between property name and node name in synthetic keys
pub const SEPARATOR: char = ':';

/// Structured key: one property of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PropertyKey {
    /// Owning node
    pub node: NodeId,
    /// Property of that node
    pub property: Property,
}

impl PropertyKey {
    /// Create key
    #[inline]
    #[must_use]
    pub const fn new(node: NodeId, property: Property) -> Self {
        Self { node, property }
    }
}

impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.property, self.node.short())
    }
}

/// Synthetic string key: `"{property}:{nodeName}"`
///
/// # Example
/// ```
/// use scenegen_graph::Property;
/// use scenegen_props::SyntheticKey;
///
/// let key: SyntheticKey = "visible:Door:Left".parse().unwrap();
/// assert_eq!(key.property(), Property::Visible);
/// assert_eq!(key.node_name(), "Door:Left");
/// assert_eq!(key.to_string(), "visible:Door:Left");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntheticKey {
    property: Property,
    node_name: String,
}

impl SyntheticKey {
    /// Create key
    #[inline]
    #[must_use]
    pub fn new(property: Property, node_name: impl Into<String>) -> Self {
        Self {
            property,
            node_name: node_name.into(),
        }
    }

    /// Property part
    #[inline]
    #[must_use]
    pub fn property(&self) -> Property {
        self.property
    }

    /// Node-name part (may contain the separator)
    #[inline]
    #[must_use]
    pub fn node_name(&self) -> &str {
        &self.node_name
    }
}

impl Display for SyntheticKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.property, self.node_name)
    }
}

impl FromStr for SyntheticKey {
    type Err = KeyError;

    /// Anchored parse: the text before the first separator must be a known
    /// property; everything after it is the node name, separators included.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, node_name) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| KeyError::MissingSeparator(s.to_string()))?;
        let property = head
            .parse::<Property>()
            .map_err(|_| KeyError::UnknownProperty(head.to_string()))?;
        if node_name.is_empty() {
            return Err(KeyError::EmptyNodeName(s.to_string()));
        }
        Ok(Self::new(property, node_name))
    }
}

/// Outcome of matching a synthetic key against one node name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeMatch {
    /// Key addresses this property of the node
    Property(Property),
    /// Remainder still holds a separator: key belongs to another node
    Foreign,
    /// Remainder is separator-free but names no editable property
    Unknown(String),
}

/// Match a synthetic key against a node name by stripping `":{node_name}"`
///
/// The first occurrence is removed wherever it sits in the key, which is how
/// string-keyed batches have always been routed. Keys for nodes whose names
/// share a prefix can leave a separator-free remainder that is not a property
/// name (`"visible:Ax"` against node `"A"` leaves `"visiblex"`); those come
/// back as [`NodeMatch::Unknown`] rather than touching the node. A key that
/// does not carry `":{node_name}"` at all is [`NodeMatch::Foreign`], so a bare
/// property name never reaches any node.
#[must_use]
pub fn match_node(key: &str, node_name: &str) -> NodeMatch {
    let needle = format!("{SEPARATOR}{node_name}");
    if !key.contains(&needle) {
        return NodeMatch::Foreign;
    }
    let remainder = key.replacen(&needle, "", 1);
    if remainder.contains(SEPARATOR) {
        return NodeMatch::Foreign;
    }
    match remainder.parse::<Property>() {
        Ok(property) => NodeMatch::Property(property),
        Err(_) => NodeMatch::Unknown(remainder),
    }
}

/// Synthetic key parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// No separator at all
    #[error("synthetic key has no ':' separator: '{0}'")]
    MissingSeparator(String),

    /// Text before the separator is not a property
    #[error("unknown property in synthetic key: '{0}'")]
    UnknownProperty(String),

    /// Nothing after the separator
    #[error("synthetic key has an empty node name: '{0}'")]
    EmptyNodeName(String),
}
