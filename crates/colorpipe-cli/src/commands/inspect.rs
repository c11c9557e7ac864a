//! LUT inspection command

use crate::InspectArgs;
use anyhow::{Context, Result, bail};
use colorpipe_lut::{LutFormat, read_csp, read_scratch};
use std::path::Path;

fn inspect_one(path: &Path, verbose: bool) -> Result<()> {
    let format = match LutFormat::from_extension(path) {
        Some(f) => f,
        None => bail!("Unsupported LUT format: {}", path.display()),
    };

    match format {
        LutFormat::Csp => {
            let csp =
                read_csp(path).with_context(|| format!("Failed to read: {}", path.display()))?;
            println!("{}", path.display());
            println!("  format:  CSP {}", csp.mode);
            let dims: Vec<String> = csp.dims.iter().map(|d| d.to_string()).collect();
            println!("  size:    {}", dims.join(" "));
            for (name, ch) in ["r", "g", "b"].iter().zip(csp.prelut.iter()) {
                println!("  prelut {}: {:?} -> {:?}", name, ch.inputs, ch.outputs);
            }
            println!("  rows:    {}", csp.rows.len());
            if let Some(meta) = &csp.metadata {
                println!("  metadata: {}", meta);
            }
            if verbose {
                for row in &csp.rows {
                    println!("    {:.6} {:.6} {:.6}", row[0], row[1], row[2]);
                }
            }
        }
        LutFormat::Scratch => {
            let lut = read_scratch(path)
                .with_context(|| format!("Failed to read: {}", path.display()))?;
            println!("{}", path.display());
            println!("  format:   Scratch");
            println!("  channels: {}", lut.dimension);
            println!("  samples:  {}", lut.count);
            if verbose {
                for (i, ch) in lut.channels.iter().enumerate() {
                    println!("  channel {}: {:?}", i, ch);
                }
            }
        }
    }
    Ok(())
}

pub fn run(args: InspectArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        inspect_one(path, verbose)?;
    }
    Ok(())
}
