//! Bake configuration
//!
//! Owned by the caller (CLI flags or a manifest entry) and passed into the
//! pipeline by value. Defaults match the classic 512×512×512 bake.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use vat_common::TexelFormat;

use crate::error::{BakeError, BakeResult};

/// Axis negated on every position and normal while parsing
///
/// Converts between right- and left-handed exports. Applied uniformly to
/// every row, never per-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    #[default]
    None,
    X,
    Y,
    Z,
}

impl FlipAxis {
    #[inline]
    pub fn apply(self, v: Vec3) -> Vec3 {
        match self {
            FlipAxis::None => v,
            FlipAxis::X => Vec3::new(-v.x, v.y, v.z),
            FlipAxis::Y => Vec3::new(v.x, -v.y, v.z),
            FlipAxis::Z => Vec3::new(v.x, v.y, -v.z),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakeConfig {
    /// Side of the square texel grid (width = height)
    #[serde(default = "default_texture_size")]
    pub texture_size: u32,
    /// Number of z slices, i.e. the maximum frame count
    #[serde(default = "default_texture_depth")]
    pub texture_depth: u32,
    #[serde(default)]
    pub flip_axis: FlipAxis,
    #[serde(default)]
    pub texel_format: TexelFormat,
}

fn default_texture_size() -> u32 {
    512
}

fn default_texture_depth() -> u32 {
    512
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            texture_size: default_texture_size(),
            texture_depth: default_texture_depth(),
            flip_axis: FlipAxis::None,
            texel_format: TexelFormat::Rgb8Unorm,
        }
    }
}

impl BakeConfig {
    /// Texture dimensions must be non-zero and fit the u16 header fields
    pub fn validate(&self) -> BakeResult<()> {
        for (name, value) in [
            ("texture_size", self.texture_size),
            ("texture_depth", self.texture_depth),
        ] {
            if value == 0 {
                return Err(BakeError::Config(format!("{name} must be at least 1")));
            }
            if value > u16::MAX as u32 {
                return Err(BakeError::Config(format!(
                    "{name} is {value}, maximum is {}",
                    u16::MAX
                )));
            }
        }
        Ok(())
    }
}
