//! Vertex animation binary asset formats
//!
//! These are POD (Plain Old Data) formats for GPU-ready assets.
//! No magic bytes - the format is determined by the file extension.
//!
//! All format headers implement the [`BinarySerializable`] trait for consistent
//! serialization/deserialization.

pub mod material;
pub mod mesh;
mod serialization;
pub mod texture;

pub use material::*;
pub use mesh::*;
pub use serialization::BinarySerializable;
pub use texture::*;

/// Base mesh file extension
pub const VAT_MESH_EXT: &str = "vatmesh";
/// Delta texture file extension
pub const VAT_TEXTURE_EXT: &str = "vattex";
/// Material descriptor file extension
pub const VAT_MATERIAL_EXT: &str = "json";
