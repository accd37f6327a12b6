//! Persistence of finished bakes
//!
//! Writes the mesh, both delta textures and the material descriptor next to
//! each other, named after the source CSV:
//!
//! ```text
//! <stem>_mesh.vatmesh
//! <stem>_posTexture.vattex
//! <stem>_normalsTexture.vattex
//! <stem>_material.json
//! ```

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::bake::{BakeOutput, bake};
use crate::config::BakeConfig;
use crate::formats::{
    VAT_MATERIAL_EXT, VAT_MESH_EXT, VAT_TEXTURE_EXT, write_vat_mesh, write_vat_texture,
};

/// File names of one bake's assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetNames {
    pub mesh: String,
    pub positions_texture: String,
    pub normals_texture: String,
    pub material: String,
}

impl AssetNames {
    pub fn new(stem: &str) -> Self {
        Self {
            mesh: format!("{stem}_mesh.{VAT_MESH_EXT}"),
            positions_texture: format!("{stem}_posTexture.{VAT_TEXTURE_EXT}"),
            normals_texture: format!("{stem}_normalsTexture.{VAT_TEXTURE_EXT}"),
            material: format!("{stem}_material.{VAT_MATERIAL_EXT}"),
        }
    }
}

/// Paths written by [`write_bake`]
#[derive(Debug, Clone)]
pub struct ExportedPaths {
    pub mesh: PathBuf,
    pub positions_texture: PathBuf,
    pub normals_texture: PathBuf,
    pub material: PathBuf,
}

/// Write all assets of a bake into `dir`, replacing existing files
pub fn write_bake(
    output: &BakeOutput,
    config: &BakeConfig,
    dir: &Path,
    stem: &str,
) -> Result<ExportedPaths> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;

    let names = AssetNames::new(stem);
    let paths = ExportedPaths {
        mesh: dir.join(&names.mesh),
        positions_texture: dir.join(&names.positions_texture),
        normals_texture: dir.join(&names.normals_texture),
        material: dir.join(&names.material),
    };

    write_asset(&paths.mesh, |w| write_vat_mesh(w, &output.mesh))?;
    write_asset(&paths.positions_texture, |w| {
        write_vat_texture(w, &output.position_texture)
    })?;
    write_asset(&paths.normals_texture, |w| {
        write_vat_texture(w, &output.normal_texture)
    })?;

    let material = output.material(stem, config);
    write_asset(&paths.material, |w| {
        serde_json::to_writer_pretty(&mut *w, &material)?;
        writeln!(w)?;
        Ok(())
    })?;

    Ok(paths)
}

fn write_asset<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    if path.exists() {
        tracing::debug!("Replacing existing asset {:?}", path);
    } else {
        tracing::debug!("Creating new asset {:?}", path);
    }

    let file = File::create(path).with_context(|| format!("Failed to create output: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).with_context(|| format!("Failed to write {:?}", path))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

/// Read a CSV export, bake it and write the assets into `dir`
///
/// The stem of `input` names the outputs.
pub fn convert_csv(input: &Path, dir: &Path, config: &BakeConfig) -> Result<ExportedPaths> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Input has no usable file name: {:?}", input))?;
    convert_named(input, dir, stem, config)
}

/// Like [`convert_csv`], with the output stem chosen by the caller
pub fn convert_named(
    input: &Path,
    dir: &Path,
    stem: &str,
    config: &BakeConfig,
) -> Result<ExportedPaths> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read CSV: {:?}", input))?;

    let output = bake(&text, config).with_context(|| format!("Failed to bake {:?}", input))?;
    let paths = write_bake(&output, config, dir, stem)?;

    tracing::info!(
        "Baked {}: {} frames, {} vertices, {}x{}x{} {:?}",
        stem,
        output.frame_count(),
        output.vertex_count(),
        config.texture_size,
        config.texture_size,
        config.texture_depth,
        config.texel_format
    );

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vat_common::{VatMaterial, VatMeshHeader, VatTextureHeader};

    const TRIANGLE_CSV: &str = "f\nv,0,0,0\nv,1,0,0\nv,0,1,0\nn,0,0,1\nn,0,0,1\nn,0,0,1\n\
                                uv,0,0\nuv,1,0\nuv,0,1\n\
                                f\nv,0,0,1\nv,1,0,1\nv,0,1,1\nn,0,0,1\nn,0,0,1\nn,0,0,1\n\
                                uv,0,0\nuv,1,0\nuv,0,1\n";

    #[test]
    fn test_asset_names() {
        let names = AssetNames::new("walk");
        assert_eq!(names.mesh, "walk_mesh.vatmesh");
        assert_eq!(names.positions_texture, "walk_posTexture.vattex");
        assert_eq!(names.normals_texture, "walk_normalsTexture.vattex");
        assert_eq!(names.material, "walk_material.json");
    }

    #[test]
    fn test_convert_csv_writes_all_assets() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("wave.csv");
        std::fs::write(&input, TRIANGLE_CSV).unwrap();

        let config = BakeConfig {
            texture_size: 4,
            texture_depth: 2,
            ..Default::default()
        };
        let out_dir = dir.path().join("baked");
        let paths = convert_csv(&input, &out_dir, &config).unwrap();

        let mesh = std::fs::read(&paths.mesh).unwrap();
        let header = VatMeshHeader::from_bytes(&mesh).unwrap();
        assert_eq!(header.vertex_count, 3);
        assert_eq!(mesh.len(), header.file_size());

        let tex = std::fs::read(&paths.positions_texture).unwrap();
        let header = VatTextureHeader::from_bytes(&tex).unwrap();
        assert_eq!((header.width, header.height, header.depth), (4, 4, 2));
        assert_eq!(tex.len(), VatTextureHeader::SIZE + header.data_size());

        let material: VatMaterial =
            serde_json::from_str(&std::fs::read_to_string(&paths.material).unwrap()).unwrap();
        assert_eq!(material.frame_count, 2);
        assert_eq!(material.positions_texture, "wave_posTexture.vattex");
        assert_eq!(material.position_bounds.max, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_write_bake_replaces_existing() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = BakeConfig {
            texture_size: 2,
            texture_depth: 2,
            ..Default::default()
        };
        let output = bake(TRIANGLE_CSV, &config).unwrap();

        std::fs::write(dir.path().join("x_mesh.vatmesh"), b"stale").unwrap();
        let paths = write_bake(&output, &config, dir.path(), "x").unwrap();

        let mesh = std::fs::read(&paths.mesh).unwrap();
        assert_eq!(mesh.len(), VatMeshHeader::from_bytes(&mesh).unwrap().file_size());
    }

    #[test]
    fn test_convert_csv_reports_format_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("bad.csv");
        std::fs::write(&input, "f\nv,1,2\n").unwrap();

        let err = convert_csv(&input, dir.path(), &BakeConfig::default()).unwrap_err();
        let root = err.root_cause().to_string();
        assert!(root.contains("line 2"), "{root}");
        assert!(!dir.path().join("bad_mesh.vatmesh").exists());
    }
}
