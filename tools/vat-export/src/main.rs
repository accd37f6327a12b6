//! vat-export - vertex animation texture baker
//!
//! Converts per-frame mesh CSV exports into a base mesh (.vatmesh), position
//! and normal delta textures (.vattex) and a material descriptor (.json).

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use vat_export::{BakeConfig, FlipAxis, TexelFormat, export, manifest};

#[derive(Parser)]
#[command(name = "vat-export")]
#[command(about = "Vertex animation texture baker")]
#[command(version)]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake a single CSV export
    Bake {
        /// Input CSV file
        input: PathBuf,

        /// Output directory (default: next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Texture width and height in texels
        #[arg(short, long, default_value_t = 512)]
        size: u32,

        /// Texture depth (maximum frame count)
        #[arg(short, long, default_value_t = 512)]
        depth: u32,

        /// Negate this axis on every position and normal
        #[arg(long, value_enum)]
        flip: Option<FlipArg>,

        /// Texel channel format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Rgb8)]
        format: FormatArg,
    },

    /// Bake every entry of a manifest file
    Build {
        /// Path to vat.toml manifest
        #[arg(default_value = "vat.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without baking
    Check {
        /// Path to vat.toml manifest
        #[arg(default_value = "vat.toml")]
        manifest: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FlipArg {
    X,
    Y,
    Z,
}

impl From<FlipArg> for FlipAxis {
    fn from(arg: FlipArg) -> Self {
        match arg {
            FlipArg::X => FlipAxis::X,
            FlipArg::Y => FlipAxis::Y,
            FlipArg::Z => FlipAxis::Z,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// 8-bit unorm per channel
    Rgb8,
    /// 16-bit unorm per channel
    Rgb16,
    /// 16-bit float per channel
    Rgb16f,
}

impl From<FormatArg> for TexelFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Rgb8 => TexelFormat::Rgb8Unorm,
            FormatArg::Rgb16 => TexelFormat::Rgb16Unorm,
            FormatArg::Rgb16f => TexelFormat::Rgb16Float,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match cli.command {
        Commands::Bake {
            input,
            output,
            size,
            depth,
            flip,
            format,
        } => {
            let config = BakeConfig {
                texture_size: size,
                texture_depth: depth,
                flip_axis: flip.map(FlipAxis::from).unwrap_or_default(),
                texel_format: format.into(),
            };
            let output = output.unwrap_or_else(|| {
                input
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default()
            });
            tracing::info!("Baking {:?} -> {:?}", input, output);
            export::convert_csv(&input, &output, &config)?;
            tracing::info!("Done!");
        }

        Commands::Build { manifest, output } => {
            tracing::info!("Building bakes from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let root = manifest::manifest_root(&manifest);
            manifest::validate(&config, root)?;
            let written = manifest::build_all(&config, root, output.as_deref())?;
            tracing::info!("Build complete! {} bakes written", written.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config, manifest::manifest_root(&manifest))?;
            tracing::info!("Manifest is valid!");
        }
    }

    Ok(())
}
