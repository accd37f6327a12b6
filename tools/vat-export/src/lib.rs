//! vat-export library
//!
//! Bakes per-frame mesh CSV exports into a base mesh plus position- and
//! normal-delta 3D textures for vertex animation playback.
//!
//! The pipeline stages are usable on their own:
//! [`csv`] → [`delta`] → [`texel`] → [`mesh`], sequenced by [`bake`].
//! [`export`] and [`manifest`] add file I/O on top.

pub mod bake;
pub mod config;
pub mod csv;
pub mod delta;
pub mod error;
pub mod export;
pub mod formats;
pub mod manifest;
pub mod mesh;
pub mod texel;

// Re-export the pipeline entry points
pub use bake::{BakeOutput, bake, bake_frames};
pub use config::{BakeConfig, FlipAxis};
pub use csv::{Frame, FrameSequence, parse_frames};
pub use delta::{AxisBounds, NormalizedDeltaSet, normalize_deltas};
pub use error::{Attribute, BakeError, BakeResult, CapacityKind};
pub use mesh::{MeshDescriptor, build_base_mesh, secondary_uv};
pub use texel::{TexelBuffer, pack_texels, texel_coord};

// Re-export I/O helpers
pub use export::{AssetNames, ExportedPaths, convert_csv, convert_named, write_bake};

// Re-export format types from vat-common
pub use vat_common::{TexelFormat, VatMaterial, VatMeshHeader, VatTextureHeader, VatVertex};
