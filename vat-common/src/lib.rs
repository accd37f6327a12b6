//! Shared types and utilities for vertex animation textures
//!
//! This crate provides the I/O-free pieces shared between:
//! - `vat-export` (bake pipeline and CLI)
//! - playback runtimes that load the baked assets
//!
//! # Modules
//!
//! - [`packing`] - Texel channel packing (f32 → unorm8/unorm16/f16 and back)
//! - [`formats`] - Binary asset headers and the material descriptor

pub mod formats;
pub mod packing;

pub use formats::{
    BinarySerializable, BoundsDesc, MESH_FLAG_UV, TexelFormat, VAT_MATERIAL_EXT, VAT_MESH_EXT,
    VAT_TEXTURE_EXT, VatMaterial, VatMeshHeader, VatTextureHeader, VatVertex,
};

pub use packing::{
    f32_to_unorm8, f32_to_unorm16, pack_rgb_f16, pack_rgb_unorm8, pack_rgb_unorm16,
    unorm8_to_f32, unorm16_to_f32, unpack_rgb_f16, unpack_rgb_unorm8, unpack_rgb_unorm16,
};
