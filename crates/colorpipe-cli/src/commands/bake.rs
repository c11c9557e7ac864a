//! LUT baking command

use crate::BakeArgs;
use crate::curves::Curve;
use anyhow::{Context, Result, bail};
use colorpipe_lut::{LutDimension, LutFormat, Preset};
use tracing::debug;

/// Default dimension: CSP bakes cubes, Scratch only has curves.
fn default_dim(format: LutFormat) -> LutDimension {
    match format {
        LutFormat::Csp => LutDimension::ThreeD,
        LutFormat::Scratch => LutDimension::TwoD,
    }
}

/// Defaults, then the YAML preset, then command line overrides.
fn build_preset(args: &BakeArgs, format: LutFormat) -> Result<Preset> {
    let mut preset = format.default_preset();
    if let Some(path) = &args.preset {
        preset = preset
            .load_yaml(path)
            .with_context(|| format!("Failed to load preset: {}", path.display()))?;
    }
    if let Some(range) = &args.in_range {
        preset = preset.with_input_range(super::parse_range(range)?)?;
    }
    if let Some(range) = &args.out_range {
        preset = preset.with_output_range(super::parse_range(range)?)?;
    }
    if let Some(bits) = args.bitdepth {
        preset = preset.with_bitdepth(bits)?;
    }
    if let Some(size) = args.cube_size {
        preset = preset.with_cube_size(size)?;
    }
    if let Some(title) = &args.title {
        preset = preset.with_title(title.as_str());
    }
    Ok(preset)
}

pub fn run(args: BakeArgs, format: Option<LutFormat>, verbose: bool) -> Result<()> {
    let format = match format.or_else(|| LutFormat::from_extension(&args.output)) {
        Some(f) => f,
        None => bail!(
            "Cannot guess LUT format of {}; use the csp or scratch command",
            args.output.display()
        ),
    };
    let dim = match &args.dim {
        Some(d) => d.parse::<LutDimension>()?,
        None => default_dim(format),
    };
    let mut curve: Curve = args.curve.parse()?;
    let preset = build_preset(&args, format)?;
    debug!(?preset, "resolved preset");

    if verbose {
        println!(
            "Baking {} {} LUT of {} to {}",
            dim,
            format,
            curve,
            args.output.display()
        );
    }

    format
        .writer()
        .write(dim, &mut curve, &args.output, &preset)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
