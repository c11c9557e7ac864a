//! Sampling of color transforms on regular grids.
//!
//! 1D/2D LUTs sample `2^bitdepth` evenly spaced values of the input range,
//! each broadcast to all three channels. 3D LUTs sample a `size^3` cube
//! with red varying fastest, then green, then blue. That order is the one
//! CSP readers expect for the data rows.

use crate::error::TransformError;
use crate::preset::{LutRange, Preset};
use crate::{LutError, LutResult};
use tracing::debug;

/// A color transform sampled by the LUT writers.
///
/// Implemented for every `FnMut([f64; 3]) -> Result<[f64; 3], E>` closure.
/// Wrap infallible closures in [`FnTransform`].
pub trait ColorTransform {
    /// Transforms one RGB triple.
    fn apply_rgb(&mut self, rgb: [f64; 3]) -> Result<[f64; 3], TransformError>;
}

impl<F, E> ColorTransform for F
where
    F: FnMut([f64; 3]) -> Result<[f64; 3], E>,
    E: Into<TransformError>,
{
    fn apply_rgb(&mut self, rgb: [f64; 3]) -> Result<[f64; 3], TransformError> {
        self(rgb).map_err(Into::into)
    }
}

/// Adapter for transforms that cannot fail.
///
/// ```rust
/// use colorpipe_lut::{ColorTransform, FnTransform};
///
/// let mut half = FnTransform(|rgb: [f64; 3]| rgb.map(|c| c * 0.5));
/// assert_eq!(half.apply_rgb([1.0, 0.5, 0.0]).unwrap(), [0.5, 0.25, 0.0]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnTransform<F>(pub F);

impl<F> ColorTransform for FnTransform<F>
where
    F: FnMut([f64; 3]) -> [f64; 3],
{
    fn apply_rgb(&mut self, rgb: [f64; 3]) -> Result<[f64; 3], TransformError> {
        Ok((self.0)(rgb))
    }
}

/// A grid point and the transform output at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Grid point fed to the transform.
    pub input: [f64; 3],
    /// Transform output.
    pub output: [f64; 3],
}

/// Evenly spaced values over a range, endpoints included.
#[derive(Debug, Clone)]
pub struct Ramp {
    lo: f64,
    hi: f64,
    step: f64,
    count: usize,
    pos: usize,
}

impl Iterator for Ramp {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.pos >= self.count {
            return None;
        }
        let i = self.pos;
        self.pos += 1;
        if i > 0 && i + 1 == self.count {
            // land exactly on the upper bound
            return Some(self.hi);
        }
        Some(self.lo + i as f64 * self.step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Ramp {}

/// Returns `count` values spanning `range`, ascending, endpoints included.
///
/// A single-value ramp yields the lower bound.
pub fn ramp(range: &LutRange, count: usize) -> Ramp {
    let step = if count > 1 {
        range.span() / (count - 1) as f64
    } else {
        0.0
    };
    Ramp {
        lo: range.lo(),
        hi: range.hi(),
        step,
        count,
        pos: 0,
    }
}

/// RGB points of a regular cube, red fastest, then green, then blue.
#[derive(Debug, Clone)]
pub struct CubeGrid {
    axis: Vec<f64>,
    total: usize,
    pos: usize,
}

impl CubeGrid {
    /// Creates a `size^3` grid spanning `range` on each axis.
    pub fn new(range: &LutRange, size: usize) -> Self {
        Self {
            axis: ramp(range, size).collect(),
            total: size.saturating_mul(size).saturating_mul(size),
            pos: 0,
        }
    }

    /// Axis resolution.
    pub fn size(&self) -> usize {
        self.axis.len()
    }

    /// Total number of points.
    pub fn len_total(&self) -> usize {
        self.total
    }
}

impl Iterator for CubeGrid {
    type Item = [f64; 3];

    fn next(&mut self) -> Option<[f64; 3]> {
        if self.pos >= self.total {
            return None;
        }
        let n = self.axis.len();
        let i = self.pos;
        self.pos += 1;
        let r = i % n;
        let g = (i / n) % n;
        let b = i / (n * n);
        Some([self.axis[r], self.axis[g], self.axis[b]])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.len_total() - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for CubeGrid {}

fn sample_points<T, I>(transform: &mut T, points: I) -> LutResult<Vec<Sample>>
where
    T: ColorTransform + ?Sized,
    I: ExactSizeIterator<Item = [f64; 3]>,
{
    let mut samples = Vec::with_capacity(points.len());
    for input in points {
        let output = transform.apply_rgb(input).map_err(LutError::Transform)?;
        samples.push(Sample { input, output });
    }
    Ok(samples)
}

/// Samples a 1D/2D LUT: `2^output_bitdepth` ramp values over the input range.
///
/// Each ramp value is broadcast to all three channels before the transform.
///
/// # Errors
///
/// - [`LutError::Preset`] if a preset field is out of bounds.
/// - [`LutError::Transform`] with the transform's own error if it fails.
pub fn sample_1d<T>(transform: &mut T, preset: &Preset) -> LutResult<Vec<Sample>>
where
    T: ColorTransform + ?Sized,
{
    preset.validate_fields()?;
    let count = preset.sample_count();
    debug!(count, range = %preset.input_range, "sampling 1D LUT");
    let points = ramp(&preset.input_range, count).map(|v| [v, v, v]);
    sample_points(transform, points)
}

/// Samples a 3D LUT: `cube_size^3` grid points over the input range.
///
/// # Errors
///
/// Same as [`sample_1d`].
pub fn sample_3d<T>(transform: &mut T, preset: &Preset) -> LutResult<Vec<Sample>>
where
    T: ColorTransform + ?Sized,
{
    preset.validate_fields()?;
    let grid = CubeGrid::new(&preset.input_range, preset.cube_size);
    debug!(size = preset.cube_size, count = grid.len_total(), "sampling 3D LUT");
    sample_points(transform, grid)
}
