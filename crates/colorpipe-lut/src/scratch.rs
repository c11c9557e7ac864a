//! Scratch LUT writer and reader.
//!
//! Scratch LUTs store integer-quantized curves:
//!
//! ```text
//! # Scratch LUT generated by colorpipe
//! LUT: 3 4
//!       0
//!       1
//!       ...
//! ```
//!
//! `LUT: <dimension> <count>` is followed by `dimension` blocks of `count`
//! values each (all red values, then all green, then all blue). Values are
//! scaled from `[0, 1]` to `[0, count - 1]`.

use crate::preset::Preset;
use crate::quantize::{check_lengths, normalize, quantize};
use crate::sample::{ColorTransform, sample_1d};
use crate::{LutError, LutResult};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Name written in the comment line.
pub const TOOL_NAME: &str = "colorpipe";

const INDENT: &str = "      ";

fn write_range<W: Write>(w: &mut W, values: &[i64]) -> LutResult<()> {
    for v in values {
        writeln!(w, "{INDENT}{v}")?;
    }
    Ok(())
}

fn max_value(count: usize) -> u32 {
    u32::try_from(count.saturating_sub(1)).unwrap_or(u32::MAX)
}

/// Writes a Scratch LUT to a writer.
///
/// One channel is written unless both `y` and `z` are given.
///
/// # Errors
///
/// [`LutError::LengthMismatch`] if `x`, `y` and `z` differ in length. The
/// comment line may already be written; no `LUT:` line or value is.
pub fn write_scratch_2d_to<W: Write>(
    w: &mut W,
    x: &[f64],
    y: Option<&[f64]>,
    z: Option<&[f64]>,
) -> LutResult<()> {
    writeln!(w, "# Scratch LUT generated by {TOOL_NAME}")?;
    let count = x.len();
    let max = max_value(count);
    match (y, z) {
        (Some(y), Some(z)) => {
            check_lengths(&[x, y, z])?;
            writeln!(w, "LUT: 3 {count}")?;
            for channel in [x, y, z] {
                write_range(w, &quantize(channel, max))?;
            }
        }
        _ => {
            writeln!(w, "LUT: 1 {count}")?;
            write_range(w, &quantize(x, max))?;
        }
    }
    Ok(())
}

/// Writes a 1D or 2D Scratch LUT file.
///
/// The file is created first and closed on every path, including a length
/// mismatch.
pub fn write_scratch_2d(
    path: &Path,
    x: &[f64],
    y: Option<&[f64]>,
    z: Option<&[f64]>,
) -> LutResult<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_scratch_2d_to(&mut w, x, y, z)?;
    w.flush()?;
    info!(path = %path.display(), count = x.len(), "Scratch LUT successfully exported");
    Ok(())
}

/// Writes a single-channel Scratch LUT file.
pub fn write_scratch_1d(path: &Path, values: &[f64]) -> LutResult<()> {
    write_scratch_2d(path, values, None, None)
}

/// Samples `transform` and splits normalized outputs into channels.
fn sampled_channels<T>(transform: &mut T, preset: &Preset) -> LutResult<[Vec<f64>; 3]>
where
    T: ColorTransform + ?Sized,
{
    let samples = sample_1d(transform, preset)?;
    let channel = |i: usize| -> Vec<f64> {
        let raw: Vec<f64> = samples.iter().map(|s| s.output[i]).collect();
        normalize(&raw, &preset.output_range)
    };
    debug!(count = samples.len(), "normalized scratch samples");
    Ok([channel(0), channel(1), channel(2)])
}

/// Bakes `transform` into a single-channel Scratch LUT (red output).
pub fn bake_scratch_1d<T>(transform: &mut T, path: &Path, preset: &Preset) -> LutResult<()>
where
    T: ColorTransform + ?Sized,
{
    let [r, _, _] = sampled_channels(transform, preset)?;
    write_scratch_1d(path, &r)
}

/// Bakes `transform` into a three-channel Scratch LUT.
pub fn bake_scratch_2d<T>(transform: &mut T, path: &Path, preset: &Preset) -> LutResult<()>
where
    T: ColorTransform + ?Sized,
{
    let [r, g, b] = sampled_channels(transform, preset)?;
    write_scratch_2d(path, &r, Some(g.as_slice()), Some(b.as_slice()))
}

// ============================================================================
// Parsing
// ============================================================================

/// Contents of a Scratch LUT file.
#[derive(Debug, Clone, PartialEq)]
pub struct ScratchLut {
    /// Number of channels (1 or 3).
    pub dimension: usize,
    /// Values per channel.
    pub count: usize,
    /// Channel blocks in file order.
    pub channels: Vec<Vec<i64>>,
}

/// Reads a Scratch LUT file.
pub fn read_scratch(path: &Path) -> LutResult<ScratchLut> {
    let file = File::open(path)?;
    parse_scratch(BufReader::new(file))
}

/// Parses a Scratch LUT from a reader.
pub fn parse_scratch<R: BufRead>(reader: R) -> LutResult<ScratchLut> {
    let mut header: Option<(usize, usize)> = None;
    let mut values: Vec<i64> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("LUT:") {
            let parts: Vec<usize> = rest
                .split_whitespace()
                .map(|s| s.parse::<usize>())
                .collect::<Result<_, _>>()
                .map_err(|e| LutError::ParseError(format!("Invalid LUT line: {}", e)))?;
            match parts.as_slice() {
                [dim @ (1 | 3), count] => header = Some((*dim, *count)),
                _ => return Err(LutError::ParseError(format!("Invalid LUT line: {}", line))),
            }
            continue;
        }

        if header.is_none() {
            return Err(LutError::ParseError("value before LUT line".into()));
        }
        let v = line
            .parse::<i64>()
            .map_err(|e| LutError::ParseError(format!("Invalid LUT value {}: {}", line, e)))?;
        values.push(v);
    }

    let (dimension, count) =
        header.ok_or_else(|| LutError::ParseError("missing LUT line".into()))?;
    let expected = dimension.checked_mul(count).ok_or_else(|| {
        LutError::ParseError(format!("LUT size too large: {} x {}", dimension, count))
    })?;
    if values.len() != expected {
        return Err(LutError::ParseError(format!(
            "expected {} values, found {}",
            expected,
            values.len()
        )));
    }

    let channels = if count == 0 {
        vec![Vec::new(); dimension]
    } else {
        values.chunks(count).map(<[i64]>::to_vec).collect()
    };
    Ok(ScratchLut {
        dimension,
        count,
        channels,
    })
}
