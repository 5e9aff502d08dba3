use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What a caller does with a run where some sprite did not fit.
/// The packing loop always stops at the first sprite that does not fit; this only
/// decides whether the placements made before it are usable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Treat a partial pack as an error and emit nothing.
    #[default]
    Abort,
    /// Emit manifests for the sprites placed before the first overflow.
    EmitPartial,
}

impl FromStr for OverflowPolicy {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "emit_partial" | "partial" => Ok(Self::EmitPartial),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackerConfig {
    /// Maximum atlas width in pixels.
    pub max_width: u32,
    /// Maximum atlas height in pixels.
    pub max_height: u32,
    /// Pixels reserved between placed sprites.
    pub padding: u32,
    /// Trim the merged atlas to its content after a complete pack.
    #[serde(default)]
    pub autocrop: bool,

    /// Crop each sprite to its opaque bounds (alpha > trim_threshold) before placing.
    #[serde(default = "default_trim")]
    pub trim: bool,
    #[serde(default)]
    pub trim_threshold: u8,

    #[serde(default)]
    pub overflow: OverflowPolicy,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            max_width: 512,
            max_height: 512,
            padding: 2,
            autocrop: false,
            trim: default_trim(),
            trim_threshold: 0,
            overflow: OverflowPolicy::default(),
        }
    }
}

fn default_trim() -> bool {
    true
}

impl PackerConfig {
    /// Validates the configuration parameters.
    ///
    /// Both atlas bounds must be positive. Padding may be any value; a padding larger
    /// than the atlas only means that at most one sprite fits.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SheetPackerError;

        if self.max_width == 0 || self.max_height == 0 {
            return Err(SheetPackerError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }
        Ok(())
    }

    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn padding(mut self, v: u32) -> Self {
        self.cfg.padding = v;
        self
    }
    pub fn autocrop(mut self, v: bool) -> Self {
        self.cfg.autocrop = v;
        self
    }
    pub fn trim(mut self, v: bool) -> Self {
        self.cfg.trim = v;
        self
    }
    pub fn trim_threshold(mut self, v: u8) -> Self {
        self.cfg.trim_threshold = v;
        self
    }
    pub fn overflow(mut self, v: OverflowPolicy) -> Self {
        self.cfg.overflow = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}
