//! Manifest parsing and batch baking
//!
//! Parses vat.toml and bakes every listed CSV. Relative paths resolve
//! against the manifest's directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use vat_common::TexelFormat;

use crate::config::{BakeConfig, FlipAxis};
use crate::export::{ExportedPaths, convert_named};

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    /// Settings applied to every entry unless overridden
    #[serde(default)]
    pub defaults: BakeConfig,
    #[serde(default)]
    pub bakes: BTreeMap<String, BakeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("baked/")
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BakeEntry {
    Simple(PathBuf),
    Detailed {
        path: PathBuf,
        #[serde(default)]
        texture_size: Option<u32>,
        #[serde(default)]
        texture_depth: Option<u32>,
        #[serde(default)]
        flip_axis: Option<FlipAxis>,
        #[serde(default)]
        texel_format: Option<TexelFormat>,
    },
}

impl BakeEntry {
    pub fn path(&self) -> &Path {
        match self {
            BakeEntry::Simple(p) => p,
            BakeEntry::Detailed { path, .. } => path,
        }
    }

    /// Effective config: `defaults` with this entry's overrides applied
    pub fn config(&self, defaults: &BakeConfig) -> BakeConfig {
        match self {
            BakeEntry::Simple(_) => *defaults,
            BakeEntry::Detailed {
                texture_size,
                texture_depth,
                flip_axis,
                texel_format,
                ..
            } => BakeConfig {
                texture_size: texture_size.unwrap_or(defaults.texture_size),
                texture_depth: texture_depth.unwrap_or(defaults.texture_depth),
                flip_axis: flip_axis.unwrap_or(defaults.flip_axis),
                texel_format: texel_format.unwrap_or(defaults.texel_format),
            },
        }
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let manifest: Manifest = toml::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;
    Ok(manifest)
}

/// Directory relative manifest paths resolve against
pub fn manifest_root(manifest_path: &Path) -> &Path {
    manifest_path.parent().unwrap_or_else(|| Path::new("."))
}

/// Validate a manifest without baking
pub fn validate(manifest: &Manifest, root: &Path) -> Result<()> {
    if manifest.bakes.is_empty() {
        anyhow::bail!("Manifest lists no bakes");
    }
    for (name, entry) in &manifest.bakes {
        let source = root.join(entry.path());
        if !source.exists() {
            anyhow::bail!("Bake '{}' source not found: {:?}", name, source);
        }
        entry
            .config(&manifest.defaults)
            .validate()
            .with_context(|| format!("Bake '{}' has an invalid configuration", name))?;
    }
    Ok(())
}

/// Bake every manifest entry, one at a time in key order
///
/// Stops at the first failing entry. Outputs are named after each entry's
/// key, not its source file.
pub fn build_all(
    manifest: &Manifest,
    root: &Path,
    output_override: Option<&Path>,
) -> Result<Vec<ExportedPaths>> {
    let output_dir = match output_override {
        Some(dir) => dir.to_path_buf(),
        None => root.join(&manifest.output.dir),
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    manifest
        .bakes
        .iter()
        .map(|(name, entry)| {
            let source = root.join(entry.path());
            let config = entry.config(&manifest.defaults);
            tracing::info!("Baking {} -> {:?}", name, output_dir);
            convert_named(&source, &output_dir, name, &config)
                .with_context(|| format!("Bake '{}' failed", name))
        })
        .collect()
}
