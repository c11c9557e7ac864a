//! Cinespace (CSP) LUT writer and reader.
//!
//! CSP is a text-based LUT format used by Rising Sun Research Cinespace.
//! Written files always carry the same global range in all three pre-LUT
//! blocks; per-channel shaper curves are not generated.
//!
//! # Format Structure
//!
//! ```text
//! CSPLUTV100
//! 1D or 3D
//!
//! 2
//! <in_min> <in_max>
//! <out_min> <out_max>
//!
//! 2
//! <in_min> <in_max>
//! <out_min> <out_max>
//!
//! 2
//! <in_min> <in_max>
//! <out_min> <out_max>
//!
//! <lut_size> (for 1D) or <size_r> <size_g> <size_b> (for 3D)
//! <r g b>
//! ...
//! ```
//!
//! 3D rows are ordered red fastest, then green, then blue.
//!
//! CSP has no true single-channel 1D LUT: a 1D request is written as a
//! "2D" LUT, i.e. the `1D` header with one `r g b` row per sample.
//!
//! # References
//!
//! - OpenColorIO FileFormatCSP.cpp

use crate::preset::Preset;
use crate::range::validate_ranges;
use crate::sample::{ColorTransform, Sample, sample_1d, sample_3d};
use crate::{LutError, LutResult};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// First line of every CSP file.
pub const CSP_MAGIC: &str = "CSPLUTV100";

/// Header mode tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CspMode {
    /// Per-channel curves (`1D`).
    OneD,
    /// Color cube (`3D`).
    ThreeD,
}

impl fmt::Display for CspMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CspMode::OneD => "1D",
            CspMode::ThreeD => "3D",
        })
    }
}

// ============================================================================
// Writing
// ============================================================================

fn header(preset: &Preset, mode: CspMode, count_header: &str) -> String {
    let input = &preset.input_range;
    let output = &preset.output_range;
    // same range in the three channel blocks, no real shaper
    let block = format!(
        "2\n{} {}\n{} {}\n\n",
        input.min, input.max, output.min, output.max
    );
    format!("{CSP_MAGIC}\n{mode}\n\n{block}{block}{block}{count_header}\n")
}

/// Returns the CSP header of a 1D/2D LUT (`2^output_bitdepth` samples).
pub fn header_1d(preset: &Preset) -> String {
    header(preset, CspMode::OneD, &preset.sample_count().to_string())
}

/// Returns the CSP header of a 3D LUT (`n n n`).
pub fn header_3d(preset: &Preset) -> String {
    let n = preset.cube_size;
    header(preset, CspMode::ThreeD, &format!("{n} {n} {n}"))
}

fn write_rows<W: Write>(w: &mut W, samples: &[Sample]) -> LutResult<()> {
    for s in samples {
        let [r, g, b] = s.output;
        writeln!(w, "{:.6} {:.6} {:.6}", r, g, b)?;
    }
    Ok(())
}

/// Writes header and rows of a 1D/2D CSP LUT to a writer.
pub fn write_csp_2d_to<W: Write>(w: &mut W, preset: &Preset, samples: &[Sample]) -> LutResult<()> {
    w.write_all(header_1d(preset).as_bytes())?;
    write_rows(w, samples)
}

/// Writes header and rows of a 3D CSP LUT to a writer.
pub fn write_csp_3d_to<W: Write>(w: &mut W, preset: &Preset, samples: &[Sample]) -> LutResult<()> {
    w.write_all(header_3d(preset).as_bytes())?;
    write_rows(w, samples)
}

/// Checks a preset before any CSP write: field bounds, then float ranges.
///
/// # Errors
///
/// - [`LutError::Preset`] for out-of-bounds bit depth, cube size or ranges.
/// - [`LutError::Range`] for integer-shaped ranges.
pub fn validate_csp(preset: &Preset) -> LutResult<()> {
    preset.validate_fields()?;
    validate_ranges(preset)
}

/// Validates, samples, then writes the file. Nothing touches `path`
/// until the preset and samples are good.
fn generic_write<T>(transform: &mut T, path: &Path, preset: &Preset, mode: CspMode) -> LutResult<()>
where
    T: ColorTransform + ?Sized,
{
    validate_csp(preset)?;
    let samples = match mode {
        CspMode::OneD => sample_1d(transform, preset)?,
        CspMode::ThreeD => sample_3d(transform, preset)?,
    };

    let mut w = BufWriter::new(File::create(path)?);
    match mode {
        CspMode::OneD => write_csp_2d_to(&mut w, preset, &samples)?,
        CspMode::ThreeD => write_csp_3d_to(&mut w, preset, &samples)?,
    }
    w.flush()?;

    info!(path = %path.display(), rows = samples.len(), "CSP LUT successfully exported");
    Ok(())
}

/// Writes a 1D LUT. CSP has none, so this warns and writes a 2D LUT.
pub fn write_csp_1d<T>(transform: &mut T, path: &Path, preset: &Preset) -> LutResult<()>
where
    T: ColorTransform + ?Sized,
{
    warn!("1D LUT is not supported in Csp format --> Switch to 2D LUT.");
    write_csp_2d(transform, path, preset)
}

/// Writes a 2D CSP LUT: `2^output_bitdepth` rows of `r g b`.
///
/// # Errors
///
/// - [`LutError::Preset`] for out-of-bounds preset fields; no file is created.
/// - [`LutError::Range`] for integer-shaped ranges; no file is created.
/// - [`LutError::Transform`] if the transform fails; no file is created.
/// - [`LutError::Io`] if the file cannot be written.
pub fn write_csp_2d<T>(transform: &mut T, path: &Path, preset: &Preset) -> LutResult<()>
where
    T: ColorTransform + ?Sized,
{
    generic_write(transform, path, preset, CspMode::OneD)
}

/// Writes a 3D CSP LUT: `cube_size^3` rows of `r g b`, red fastest.
///
/// # Errors
///
/// Same as [`write_csp_2d`].
pub fn write_csp_3d<T>(transform: &mut T, path: &Path, preset: &Preset) -> LutResult<()>
where
    T: ColorTransform + ?Sized,
{
    generic_write(transform, path, preset, CspMode::ThreeD)
}

// ============================================================================
// Parsing
// ============================================================================

/// Pre-LUT channel data (shaper curve).
#[derive(Debug, Clone, PartialEq)]
pub struct PreLutChannel {
    /// Input sample positions.
    pub inputs: Vec<f64>,
    /// Output sample values.
    pub outputs: Vec<f64>,
}

/// Contents of a CSP file.
#[derive(Debug, Clone)]
pub struct CspFile {
    /// Header mode.
    pub mode: CspMode,
    /// Metadata block, if present.
    pub metadata: Option<String>,
    /// Red, green and blue pre-LUTs.
    pub prelut: [PreLutChannel; 3],
    /// Sample count (1D) or axis sizes (3D, `[r, g, b]`).
    pub dims: Vec<usize>,
    /// Data rows in file order.
    pub rows: Vec<[f64; 3]>,
}

/// Reads a CSP file.
pub fn read_csp(path: &Path) -> LutResult<CspFile> {
    let file = File::open(path)?;
    parse_csp(BufReader::new(file))
}

/// Non-empty trimmed lines, in order.
struct Lines {
    inner: std::vec::IntoIter<String>,
}

impl Lines {
    fn next_line(&mut self) -> LutResult<String> {
        self.inner
            .by_ref()
            .map(|l| l.trim().to_string())
            .find(|l| !l.is_empty())
            .ok_or_else(|| LutError::ParseError("Unexpected end of file".to_string()))
    }
}

fn parse_floats(line: &str, what: &str) -> LutResult<Vec<f64>> {
    line.split_whitespace()
        .map(|s| s.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LutError::ParseError(format!("Invalid {}: {}", what, e)))
}

/// Parses a CSP file from a reader.
pub fn parse_csp<R: BufRead>(reader: R) -> LutResult<CspFile> {
    let raw: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
    let mut lines = Lines {
        inner: raw.into_iter(),
    };

    let magic = lines.next_line()?;
    if magic != CSP_MAGIC {
        return Err(LutError::ParseError(format!("Invalid CSP header: {}", magic)));
    }

    let mode = match lines.next_line()?.as_str() {
        "1D" => CspMode::OneD,
        "3D" => CspMode::ThreeD,
        other => return Err(LutError::ParseError(format!("Invalid LUT type: {}", other))),
    };

    let mut line = lines.next_line()?;
    let metadata = if line == "BEGIN METADATA" {
        let mut meta = Vec::new();
        loop {
            let l = lines.next_line()?;
            if l == "END METADATA" {
                break;
            }
            meta.push(l);
        }
        line = lines.next_line()?;
        Some(meta.join("\n"))
    } else {
        None
    };

    let red = parse_prelut_channel(line, &mut lines)?;
    let green = parse_prelut_channel(lines.next_line()?, &mut lines)?;
    let blue = parse_prelut_channel(lines.next_line()?, &mut lines)?;

    let dims_line = lines.next_line()?;
    let dims: Vec<usize> = dims_line
        .split_whitespace()
        .map(|s| s.parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LutError::ParseError(format!("Invalid LUT dimensions: {}", e)))?;

    let total = match (mode, dims.as_slice()) {
        (CspMode::OneD, [n]) => Some(*n),
        (CspMode::ThreeD, [r, g, b]) => r.checked_mul(*g).and_then(|rg| rg.checked_mul(*b)),
        _ => None,
    };
    let total = total.ok_or_else(|| {
        LutError::ParseError(format!("Invalid {} LUT dimensions: {}", mode, dims_line))
    })?;

    let mut rows = Vec::new();
    for _ in 0..total {
        let values = parse_floats(&lines.next_line()?, "LUT value")?;
        match values.as_slice() {
            [r, g, b] => rows.push([*r, *g, *b]),
            _ => {
                return Err(LutError::ParseError(format!(
                    "Expected 3 values per entry, got {}",
                    values.len()
                )))
            }
        }
    }

    Ok(CspFile {
        mode,
        metadata,
        prelut: [red, green, blue],
        dims,
        rows,
    })
}

fn parse_prelut_channel(count_line: String, lines: &mut Lines) -> LutResult<PreLutChannel> {
    let count: usize = count_line
        .parse()
        .map_err(|e| LutError::ParseError(format!("Invalid prelut count: {}", e)))?;
    let inputs = parse_floats(&lines.next_line()?, "prelut inputs")?;
    let outputs = parse_floats(&lines.next_line()?, "prelut outputs")?;

    if inputs.len() != count || outputs.len() != count {
        return Err(LutError::ParseError(format!(
            "Prelut count mismatch: expected {}, got inputs={}, outputs={}",
            count,
            inputs.len(),
            outputs.len()
        )));
    }

    Ok(PreLutChannel { inputs, outputs })
}

// ============================================================================
// Tests
// ============================================================================
