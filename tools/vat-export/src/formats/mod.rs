//! Binary writers for baked vertex animation assets
//!
//! Header layouts live in `vat_common::formats`; this module streams a
//! finished [`MeshDescriptor`] or [`TexelBuffer`] behind them.

pub use vat_common::formats::*;

use anyhow::Result;
use std::io::Write;

use crate::mesh::MeshDescriptor;
use crate::texel::TexelBuffer;

/// Write a complete VatMesh file
///
/// Vertices are interleaved 40-byte [`VatVertex`] records followed by u32
/// indices, all little-endian.
pub fn write_vat_mesh<W: Write>(w: &mut W, mesh: &MeshDescriptor) -> Result<()> {
    w.write_all(&mesh.header().to_bytes())?;

    let vertices = mesh.vertices();
    w.write_all(bytemuck::cast_slice(&vertices))?;

    for i in &mesh.indices {
        w.write_all(&i.to_le_bytes())?;
    }

    Ok(())
}

/// Write a complete VatTexture file
pub fn write_vat_texture<W: Write>(w: &mut W, texture: &TexelBuffer) -> Result<()> {
    let header = texture.header();
    if header.data_size() != texture.data.len() {
        anyhow::bail!(
            "Texel payload is {} bytes, header declares {}",
            texture.data.len(),
            header.data_size()
        );
    }

    w.write_all(&header.to_bytes())?;
    w.write_all(&texture.data)?;
    Ok(())
}
