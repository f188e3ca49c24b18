//! Editable render properties
//!
//! The fixed set of per-node properties a user may toggle: four boolean
//! render flags and the numeric render order.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// An editable property of a scene node
///
/// Names follow the three.js `Object3D` field names, since they surface in
/// synthetic keys and in generated JSX attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    /// Skip rendering when outside the camera frustum
    FrustumCulled,
    /// Node is rendered
    Visible,
    /// Node casts shadows
    CastShadow,
    /// Node receives shadows
    ReceiveShadow,
    /// Draw order override
    RenderOrder,
}

impl Property {
    /// Every editable property, booleans first
    pub const ALL: [Property; 5] = [
        Property::FrustumCulled,
        Property::Visible,
        Property::CastShadow,
        Property::ReceiveShadow,
        Property::RenderOrder,
    ];

    /// Name as it appears in keys and generated code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FrustumCulled => "frustumCulled",
            Self::Visible => "visible",
            Self::CastShadow => "castShadow",
            Self::ReceiveShadow => "receiveShadow",
            Self::RenderOrder => "renderOrder",
        }
    }

    /// Value kind carried by this property
    #[must_use]
    pub const fn kind(self) -> PropertyKind {
        match self {
            Self::RenderOrder => PropertyKind::Number,
            _ => PropertyKind::Boolean,
        }
    }

    /// Slider bounds for numeric properties
    #[must_use]
    pub const fn range(self) -> Option<NumericRange> {
        match self {
            Self::RenderOrder => Some(NumericRange::RENDER_ORDER),
            _ => None,
        }
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Property {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PropertyError::Unknown(s.to_string()))
    }
}

/// Kind of value a property holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// `true` / `false`
    Boolean,
    /// Finite number
    Number,
}

/// Value of an editable property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean flag value
    Bool(bool),
    /// Numeric value
    Number(f64),
}

impl PropertyValue {
    /// Kind of this value
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        match self {
            Self::Bool(_) => PropertyKind::Boolean,
            Self::Number(_) => PropertyKind::Number,
        }
    }

    /// Boolean payload, if any
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Number(_) => None,
        }
    }

    /// Numeric payload, if any
    #[inline]
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(_) => None,
        }
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for PropertyValue {
    type Err = PropertyError;

    /// Parse `true`, `false` or a finite number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "true" => Ok(Self::Bool(true)),
            "false" => Ok(Self::Bool(false)),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Self::Number)
                .ok_or_else(|| PropertyError::InvalidValue(s.to_string())),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Inclusive slider bounds with a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
    /// Increment
    pub step: f64,
}

impl NumericRange {
    /// Bounds used for `renderOrder`
    pub const RENDER_ORDER: Self = Self {
        min: 0.0,
        max: 1000.0,
        step: 1.0,
    };

    /// Clamp a value into the range
    #[inline]
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Whether the value lies inside the range
    #[inline]
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Property lookup / assignment errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    /// Name does not match any editable property
    #[error("unknown property: '{0}'")]
    Unknown(String),

    /// Value kind does not fit the property
    #[error("type mismatch for {property}: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        /// Target property
        property: Property,
        /// Kind the property holds
        expected: PropertyKind,
        /// Kind that was supplied
        actual: PropertyKind,
    },

    /// Text could not be parsed into a value
    #[error("invalid property value: '{0}'")]
    InvalidValue(String),
}
