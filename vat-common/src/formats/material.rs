//! VatMaterial descriptor (.json)
//!
//! Everything a playback shader needs besides the mesh and the two textures:
//! frame count and the bounds used to reconstruct deltas with
//! `actual = lerp(min, max, texel)`.

use serde::{Deserialize, Serialize};

use super::TexelFormat;

/// Bounds of one normalization run, as stored in the material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsDesc {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatMaterial {
    /// File name of the position-delta texture
    pub positions_texture: String,
    /// File name of the normal-delta texture
    pub normals_texture: String,
    /// File name of the base mesh
    pub mesh: String,
    /// Number of baked frames (z slices actually written)
    pub frame_count: u32,
    pub texture_size: u16,
    pub texture_depth: u16,
    pub texel_format: TexelFormat,
    pub position_bounds: BoundsDesc,
    pub normal_bounds: BoundsDesc,
}
