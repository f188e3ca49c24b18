//! Generation configuration
//!
//! Provides [`GenerationConfig`], the switches that shape generated JSX.
//! Its lifecycle is independent of the loaded scene.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed fractional digits for transforms
pub const PRECISION_RANGE: RangeInclusive<u8> = 1..=8;

/// Default line width handed to the formatter
pub const DEFAULT_PRINT_WIDTH: usize = 100;

/// Output dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Statically typed TSX
    Static,
    /// Untyped JSX
    Dynamic,
}

impl Dialect {
    /// Source file extension
    #[inline]
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Static => "tsx",
            Self::Dynamic => "js",
        }
    }
}

/// Switches for the code generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerationConfig {
    /// Emit TypeScript types
    pub types: bool,
    /// Instance every geometry
    pub instanceall: bool,
    /// Instance re-occurring geometries
    pub instance: bool,
    /// Verbose output (names, empty groups)
    pub verbose: bool,
    /// Keep node names
    pub keepnames: bool,
    /// Keep empty groups
    pub keepgroups: bool,
    /// Flatten identity groups
    pub aggressive: bool,
    /// Emit `userData`
    pub meta: bool,
    /// Fractional digits for transforms
    pub precision: u8,
    /// Target line width
    pub printwidth: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            types: false,
            instanceall: false,
            instance: false,
            verbose: false,
            keepnames: false,
            keepgroups: false,
            aggressive: false,
            meta: false,
            precision: 2,
            printwidth: DEFAULT_PRINT_WIDTH,
        }
    }
}

impl GenerationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With TypeScript types
    #[inline]
    #[must_use]
    pub fn with_types(mut self, types: bool) -> Self {
        self.types = types;
        self
    }

    /// With instancing of re-occurring geometries
    #[inline]
    #[must_use]
    pub fn with_instance(mut self, instance: bool) -> Self {
        self.instance = instance;
        self
    }

    /// With instancing of every geometry
    #[inline]
    #[must_use]
    pub fn with_instanceall(mut self, instanceall: bool) -> Self {
        self.instanceall = instanceall;
        self
    }

    /// With verbose output
    #[inline]
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// With node names kept
    #[inline]
    #[must_use]
    pub fn with_keepnames(mut self, keepnames: bool) -> Self {
        self.keepnames = keepnames;
        self
    }

    /// With empty groups kept
    #[inline]
    #[must_use]
    pub fn with_keepgroups(mut self, keepgroups: bool) -> Self {
        self.keepgroups = keepgroups;
        self
    }

    /// With aggressive flattening
    #[inline]
    #[must_use]
    pub fn with_aggressive(mut self, aggressive: bool) -> Self {
        self.aggressive = aggressive;
        self
    }

    /// With `userData` output
    #[inline]
    #[must_use]
    pub fn with_meta(mut self, meta: bool) -> Self {
        self.meta = meta;
        self
    }

    /// With transform precision
    #[inline]
    #[must_use]
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// With print width
    #[inline]
    #[must_use]
    pub fn with_printwidth(mut self, printwidth: usize) -> Self {
        self.printwidth = printwidth;
        self
    }

    /// Dialect selected by `types`
    #[inline]
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        if self.types {
            Dialect::Static
        } else {
            Dialect::Dynamic
        }
    }

    /// Whether node names are emitted
    #[inline]
    #[must_use]
    pub fn emits_names(&self) -> bool {
        self.keepnames || self.verbose
    }

    /// Whether empty groups survive
    #[inline]
    #[must_use]
    pub fn keeps_empty_groups(&self) -> bool {
        self.keepgroups || self.verbose
    }

    /// Check ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Precision`] or [`ConfigError::PrintWidth`] when a
    /// value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !PRECISION_RANGE.contains(&self.precision) {
            return Err(ConfigError::Precision(self.precision));
        }
        if self.printwidth == 0 {
            return Err(ConfigError::PrintWidth(self.printwidth));
        }
        Ok(())
    }
}
