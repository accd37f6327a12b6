//! VatTexture binary format (.vattex)
//!
//! Dense 3D texel grid holding one normalized delta per (vertex, frame).
//! POD format - no magic bytes.
//!
//! # Layout
//! ```text
//! 0x00: width u16
//! 0x02: height u16
//! 0x04: depth u16 (frame capacity)
//! 0x06: format u8 (TexelFormat)
//! 0x07: padding (1 byte)
//! 0x08: texel_data (width × height × depth × bytes_per_texel)
//! ```
//!
//! Texels are stored x-fastest, then y, then z (one z slice per frame).

use glam::Vec3;
use half::f16;
use serde::{Deserialize, Serialize};

use crate::packing::{
    pack_rgb_f16, pack_rgb_unorm8, pack_rgb_unorm16, unpack_rgb_f16, unpack_rgb_unorm8,
    unpack_rgb_unorm16,
};

/// Channel layout of a texel
///
/// All layouts are three channels (RGB = delta x, y, z) holding values in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TexelFormat {
    /// 8 bits per channel, unsigned normalized (reference encoding)
    #[default]
    Rgb8Unorm = 0,
    /// 16 bits per channel, unsigned normalized, little-endian
    Rgb16Unorm = 1,
    /// 16 bits per channel, IEEE half-float, little-endian
    Rgb16Float = 2,
}

impl TexelFormat {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Rgb8Unorm),
            1 => Some(Self::Rgb16Unorm),
            2 => Some(Self::Rgb16Float),
            _ => None,
        }
    }

    pub const fn bytes_per_texel(self) -> usize {
        match self {
            Self::Rgb8Unorm => 3,
            Self::Rgb16Unorm | Self::Rgb16Float => 6,
        }
    }

    /// Encode a normalized value into `out`, which must be exactly
    /// `bytes_per_texel()` long
    pub fn encode(self, value: Vec3, out: &mut [u8]) {
        match self {
            Self::Rgb8Unorm => out.copy_from_slice(&pack_rgb_unorm8(value)),
            Self::Rgb16Unorm => {
                for (chunk, c) in out.chunks_exact_mut(2).zip(pack_rgb_unorm16(value)) {
                    chunk.copy_from_slice(&c.to_le_bytes());
                }
            }
            Self::Rgb16Float => {
                for (chunk, c) in out.chunks_exact_mut(2).zip(pack_rgb_f16(value)) {
                    chunk.copy_from_slice(&c.to_bits().to_le_bytes());
                }
            }
        }
    }

    /// Decode one texel back to normalized floats
    pub fn decode(self, bytes: &[u8]) -> Vec3 {
        let u16_at = |i: usize| u16::from_le_bytes([bytes[i * 2], bytes[i * 2 + 1]]);
        match self {
            Self::Rgb8Unorm => unpack_rgb_unorm8([bytes[0], bytes[1], bytes[2]]),
            Self::Rgb16Unorm => unpack_rgb_unorm16([u16_at(0), u16_at(1), u16_at(2)]),
            Self::Rgb16Float => unpack_rgb_f16([
                f16::from_bits(u16_at(0)),
                f16::from_bits(u16_at(1)),
                f16::from_bits(u16_at(2)),
            ]),
        }
    }
}

/// VatTexture header (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct VatTextureHeader {
    pub width: u16,
    pub height: u16,
    pub depth: u16,
    pub format: TexelFormat,
    pub _padding: u8,
}

impl VatTextureHeader {
    pub const SIZE: usize = 8;

    pub fn new(width: u16, height: u16, depth: u16, format: TexelFormat) -> Self {
        Self {
            width,
            height,
            depth,
            format,
            _padding: 0,
        }
    }

    /// Size of the texel payload following the header
    pub fn data_size(&self) -> usize {
        self.width as usize
            * self.height as usize
            * self.depth as usize
            * self.format.bytes_per_texel()
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..2].copy_from_slice(&self.width.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.height.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.depth.to_le_bytes());
        bytes[6] = self.format as u8;
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            width: u16::from_le_bytes([bytes[0], bytes[1]]),
            height: u16::from_le_bytes([bytes[2], bytes[3]]),
            depth: u16::from_le_bytes([bytes[4], bytes[5]]),
            format: TexelFormat::from_u8(bytes[6])?,
            _padding: 0,
        })
    }
}
