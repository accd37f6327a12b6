//! VatMesh binary format (.vatmesh)
//!
//! Base mesh for vertex animation playback. Vertices are stored unpacked
//! (f32) so the bind pose is bit-exact with the baked reference frame.
//! POD format - no magic bytes.
//!
//! # Layout
//! ```text
//! 0x00: vertex_count u32
//! 0x04: index_count u32
//! 0x08: flags u8 (MESH_FLAG_*)
//! 0x09: padding (3 bytes)
//! 0x0C: vertex_data (vertex_count × 40 bytes, see VatVertex)
//! var:  index_data (index_count × 4 bytes, u32)
//! ```

use bytemuck::{Pod, Zeroable};

/// Mesh flag: primary UVs come from the source data (otherwise zero-filled)
pub const MESH_FLAG_UV: u8 = 1;

/// One interleaved vertex (40 bytes)
///
/// `uv2` addresses the texel holding this vertex's per-frame delta.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct VatVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub uv2: [f32; 2],
}

impl VatVertex {
    pub const SIZE: usize = 40;
}

/// VatMesh header (12 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct VatMeshHeader {
    pub vertex_count: u32,
    pub index_count: u32,
    pub flags: u8,
    pub _padding: [u8; 3],
}

impl VatMeshHeader {
    pub const SIZE: usize = 12;

    pub fn new(vertex_count: u32, index_count: u32, flags: u8) -> Self {
        Self {
            vertex_count,
            index_count,
            flags,
            _padding: [0; 3],
        }
    }

    /// Total file size implied by this header
    pub fn file_size(&self) -> usize {
        Self::SIZE + self.vertex_count as usize * VatVertex::SIZE + self.index_count as usize * 4
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.vertex_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.index_count.to_le_bytes());
        bytes[8] = self.flags;
        // padding bytes stay 0
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            vertex_count: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            index_count: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            flags: bytes[8],
            _padding: [0; 3],
        })
    }
}
