//! Preview settings
//!
//! Lighting and staging options for the sandbox `App` component.

use crate::error::StudioConfigError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Stage lighting preset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightingPreset {
    /// Key light high to one side
    #[default]
    Rembrandt,
    /// Soft frontal key
    Portrait,
    /// Flat frontal light
    Upfront,
    /// Diffuse all round
    Soft,
}

impl LightingPreset {
    /// Every preset
    pub const ALL: [Self; 4] = [Self::Rembrandt, Self::Portrait, Self::Upfront, Self::Soft];

    /// Name as the stage component expects it
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rembrandt => "rembrandt",
            Self::Portrait => "portrait",
            Self::Upfront => "upfront",
            Self::Soft => "soft",
        }
    }
}

impl Display for LightingPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Environment {
    /// No environment map
    None,
    Sunset,
    Dawn,
    Night,
    Warehouse,
    Forest,
    Apartment,
    Studio,
    #[default]
    City,
    Park,
    Lobby,
}

impl Environment {
    /// Preset name, `None` for no map
    #[must_use]
    pub const fn preset(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Sunset => Some("sunset"),
            Self::Dawn => Some("dawn"),
            Self::Night => Some("night"),
            Self::Warehouse => Some("warehouse"),
            Self::Forest => Some("forest"),
            Self::Apartment => Some("apartment"),
            Self::Studio => Some("studio"),
            Self::City => Some("city"),
            Self::Park => Some("park"),
            Self::Lobby => Some("lobby"),
        }
    }
}

/// Preview staging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreviewConfig {
    /// Orbit the camera automatically
    pub auto_rotate: bool,
    /// Draw a contact shadow under the model
    pub contact_shadow: bool,
    /// Light intensity, 0 to 2
    pub intensity: f32,
    /// Lighting preset
    pub preset: LightingPreset,
    /// Environment map
    pub environment: Environment,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            contact_shadow: true,
            intensity: 1.0,
            preset: LightingPreset::Rembrandt,
            environment: Environment::City,
        }
    }
}

impl PreviewConfig {
    /// Create default preview
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With auto-rotate
    #[inline]
    #[must_use]
    pub fn with_auto_rotate(mut self, auto_rotate: bool) -> Self {
        self.auto_rotate = auto_rotate;
        self
    }

    /// With contact shadow
    #[inline]
    #[must_use]
    pub fn with_contact_shadow(mut self, contact_shadow: bool) -> Self {
        self.contact_shadow = contact_shadow;
        self
    }

    /// With light intensity
    #[inline]
    #[must_use]
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// With lighting preset
    #[inline]
    #[must_use]
    pub fn with_preset(mut self, preset: LightingPreset) -> Self {
        self.preset = preset;
        self
    }

    /// With environment
    #[inline]
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Check ranges
    ///
    /// # Errors
    /// Returns [`StudioConfigError::Intensity`] outside [0, 2].
    pub fn validate(&self) -> Result<(), StudioConfigError> {
        if (0.0..=2.0).contains(&self.intensity) {
            Ok(())
        } else {
            Err(StudioConfigError::Intensity(self.intensity))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let preview = PreviewConfig::default();
        assert!(preview.auto_rotate && preview.contact_shadow);
        assert_eq!(preview.intensity, 1.0);
        assert_eq!(preview.preset, LightingPreset::Rembrandt);
        assert_eq!(preview.environment.preset(), Some("city"));
        assert!(preview.validate().is_ok());
    }

    #[test]
    fn intensity_bounds() {
        assert!(PreviewConfig::new().with_intensity(2.0).validate().is_ok());
        assert!(PreviewConfig::new().with_intensity(2.1).validate().is_err());
        assert!(PreviewConfig::new().with_intensity(-0.1).validate().is_err());
    }

    #[test]
    fn lowercase_names() {
        let preview: PreviewConfig =
            toml::from_str("preset = \"soft\"\nenvironment = \"none\"\nautoRotate = false").unwrap();
        assert_eq!(preview.preset, LightingPreset::Soft);
        assert_eq!(preview.environment.preset(), None);
        assert!(!preview.auto_rotate);
        assert_eq!(LightingPreset::ALL.len(), 4);
    }
}
