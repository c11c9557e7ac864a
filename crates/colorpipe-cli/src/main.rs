//! lutgen - bake analytic curves into CSP and Scratch LUTs

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colorpipe_lut::LutFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod curves;

#[derive(Parser)]
#[command(name = "lutgen")]
#[command(author, version, about = "Bake color curves into LUT files")]
#[command(long_about = "
Samples a color curve on a regular grid and writes it as a LUT.

Examples:
  lutgen csp -o grade.csp --curve gamma:2.2 --cube-size 33
  lutgen csp -o curve.csp --dim 2d --bitdepth 10 --in-range=-0.25,2.0
  lutgen scratch -o ramp.lut --curve srgb-encode
  lutgen bake -o look.csp --preset look.yaml
  lutgen inspect grade.csp
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake a Cinespace (.csp) LUT
    Csp(BakeArgs),

    /// Bake a Scratch LUT
    Scratch(BakeArgs),

    /// Bake a LUT, picking the format from the output extension
    Bake(BakeArgs),

    /// Show the header and size of a CSP or Scratch LUT
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),
}

#[derive(Args)]
struct BakeArgs {
    /// Output LUT path
    #[arg(short, long)]
    output: PathBuf,

    /// LUT dimension: 1d, 2d, 3d (default: 3d for CSP, 2d for Scratch)
    #[arg(short, long)]
    dim: Option<String>,

    /// Curve: identity, gamma:<g>, srgb-encode, srgb-decode
    #[arg(short, long, default_value = "identity")]
    curve: String,

    /// YAML preset applied over the format defaults
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Input range "min,max" (integers keep their integer shape)
    #[arg(long)]
    in_range: Option<String>,

    /// Output range "min,max"
    #[arg(long)]
    out_range: Option<String>,

    /// Output bit depth; 1D/2D LUTs get 2^bitdepth samples
    #[arg(short, long)]
    bitdepth: Option<u32>,

    /// 3D LUT axis resolution
    #[arg(short = 's', long)]
    cube_size: Option<usize>,

    /// LUT title
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args)]
struct InspectArgs {
    /// LUT file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install logger")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Csp(args) => commands::bake::run(args, Some(LutFormat::Csp), cli.verbose),
        Commands::Scratch(args) => commands::bake::run(args, Some(LutFormat::Scratch), cli.verbose),
        Commands::Bake(args) => commands::bake::run(args, None, cli.verbose),
        Commands::Inspect(args) => commands::inspect::run(args, cli.verbose),
    }
}
