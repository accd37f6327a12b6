//! Bake orchestration (CSV text -> mesh + delta textures + bounds)
//!
//! Pure and synchronous: no I/O happens here. Reading the CSV and writing
//! the results belong to the caller (see [`crate::export`]).

use glam::Vec3;
use vat_common::{BoundsDesc, VatMaterial};

use crate::config::BakeConfig;
use crate::csv::{Frame, parse_frames};
use crate::delta::{AxisBounds, normalize_deltas};
use crate::error::{Attribute, BakeError, BakeResult};
use crate::mesh::{MeshDescriptor, build_base_mesh};
use crate::texel::{TexelBuffer, pack_texels};

/// Everything a finished bake hands to the persistence layer
#[derive(Debug, Clone, PartialEq)]
pub struct BakeOutput {
    pub mesh: MeshDescriptor,
    pub position_texture: TexelBuffer,
    pub normal_texture: TexelBuffer,
    pub position_bounds: AxisBounds,
    pub normal_bounds: AxisBounds,
    /// Frames actually baked
    pub frame_count: usize,
    /// Trailing frames dropped because they did not fit the texture depth
    pub dropped_frames: usize,
}

impl BakeOutput {
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Material descriptor referencing assets written under `stem`
    pub fn material(&self, stem: &str, config: &BakeConfig) -> VatMaterial {
        let names = crate::export::AssetNames::new(stem);
        VatMaterial {
            positions_texture: names.positions_texture,
            normals_texture: names.normals_texture,
            mesh: names.mesh,
            frame_count: self.frame_count as u32,
            texture_size: config.texture_size as u16,
            texture_depth: config.texture_depth as u16,
            texel_format: config.texel_format,
            position_bounds: bounds_desc(&self.position_bounds),
            normal_bounds: bounds_desc(&self.normal_bounds),
        }
    }
}

fn bounds_desc(bounds: &AxisBounds) -> BoundsDesc {
    BoundsDesc {
        min: bounds.min.to_array(),
        max: bounds.max.to_array(),
    }
}

/// Run the whole pipeline over CSV text
pub fn bake(text: &str, config: &BakeConfig) -> BakeResult<BakeOutput> {
    config.validate()?;

    let mut frames = parse_frames(text, config.flip_axis)?;
    if frames.is_empty() {
        return Err(BakeError::NoFrames);
    }

    let depth = config.texture_depth as usize;
    let dropped_frames = frames.len().saturating_sub(depth);
    if dropped_frames > 0 {
        tracing::warn!(
            "Animation has {} frames but texture depth is {}; dropping the last {}",
            frames.len(),
            depth,
            dropped_frames
        );
        frames.truncate(depth);
    }

    bake_frames(&frames, config, dropped_frames)
}

/// Run the pipeline over already-parsed frames that fit the texture depth
pub fn bake_frames(
    frames: &[Frame],
    config: &BakeConfig,
    dropped_frames: usize,
) -> BakeResult<BakeOutput> {
    let reference = frames.first().ok_or(BakeError::NoFrames)?;

    let positions: Vec<&[Vec3]> = frames.iter().map(|f| f.positions.as_slice()).collect();
    let position_set = normalize_deltas(&reference.positions, &positions, Attribute::Positions)?;

    let normals: Vec<&[Vec3]> = frames.iter().map(|f| f.normals.as_slice()).collect();
    let normal_set = normalize_deltas(&reference.normals, &normals, Attribute::Normals)?;

    let size = config.texture_size;
    let depth = config.texture_depth;
    let position_texture =
        pack_texels(&position_set.deltas, size, size, depth, config.texel_format)?;
    let normal_texture = pack_texels(&normal_set.deltas, size, size, depth, config.texel_format)?;

    let mesh = build_base_mesh(reference, size)?;

    tracing::debug!(
        "Baked {} frames x {} vertices, position bounds {:?}..{:?}",
        frames.len(),
        mesh.vertex_count(),
        position_set.bounds.min,
        position_set.bounds.max
    );

    Ok(BakeOutput {
        mesh,
        position_texture,
        normal_texture,
        position_bounds: position_set.bounds,
        normal_bounds: normal_set.bounds,
        frame_count: frames.len(),
        dropped_frames,
    })
}
