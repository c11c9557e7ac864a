//! LUT presets: sampling resolution, ranges and metadata.
//!
//! A [`Preset`] is built once and then treated as read-only by the writers.
//! Each format provides a default preset; callers clone it and override
//! individual fields with the `with_*` builders, or overlay a YAML file.
//!
//! # YAML
//!
//! ```yaml
//! input_range: [0.0, 1.0]
//! output_range: [-0.25, 2.0]
//! output_bitdepth: 10
//! cube_size: 33
//! title: "Log to display"
//! ```
//!
//! Keys left out keep the value of the base preset. Ranges written with
//! integer literals (`[0, 1]`) keep their integer shape, which the CSP
//! writer rejects.

use crate::error::{LutResult, PresetError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Largest accepted output bit depth (2^24 samples per channel).
pub const MAX_BITDEPTH: u32 = 24;

/// Largest accepted cube axis resolution (2^24 grid points).
pub const MAX_CUBE_SIZE: usize = 256;

fn check_cube_size(size: usize) -> Result<(), PresetError> {
    if !(2..=MAX_CUBE_SIZE).contains(&size) {
        return Err(PresetError::CubeSize {
            value: size,
            max: MAX_CUBE_SIZE,
        });
    }
    Ok(())
}

/// One bound of a LUT range, remembering how it was written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeBound {
    /// Integer literal (`1`).
    Int(i64),
    /// Floating point literal (`1.0`).
    Float(f64),
}

impl RangeBound {
    /// Numeric value of the bound.
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            RangeBound::Int(v) => v as f64,
            RangeBound::Float(v) => v,
        }
    }

    /// True if the bound was written as an integer.
    #[inline]
    pub fn is_int(self) -> bool {
        matches!(self, RangeBound::Int(_))
    }
}

impl From<f64> for RangeBound {
    fn from(v: f64) -> Self {
        RangeBound::Float(v)
    }
}

impl From<i64> for RangeBound {
    fn from(v: i64) -> Self {
        RangeBound::Int(v)
    }
}

impl fmt::Display for RangeBound {
    /// Integers print bare, floats always carry a decimal point (`0.0`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::Int(v) => write!(f, "{}", v),
            RangeBound::Float(v) => write!(f, "{:?}", v),
        }
    }
}

/// Closed interval `[min, max]` used for LUT input and output domains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[RangeBound; 2]", into = "[RangeBound; 2]")]
pub struct LutRange {
    /// Lower bound.
    pub min: RangeBound,
    /// Upper bound.
    pub max: RangeBound,
}

impl LutRange {
    /// Creates a floating point range.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: RangeBound::Float(min),
            max: RangeBound::Float(max),
        }
    }

    /// Creates an integer-shaped range, as a config file would with `[0, 1]`.
    pub fn int(min: i64, max: i64) -> Self {
        Self {
            min: RangeBound::Int(min),
            max: RangeBound::Int(max),
        }
    }

    /// The `[0.0, 1.0]` range.
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// True if both bounds were written as integers.
    pub fn is_int(&self) -> bool {
        self.min.is_int() && self.max.is_int()
    }

    /// Lower bound as a float.
    #[inline]
    pub fn lo(&self) -> f64 {
        self.min.value()
    }

    /// Upper bound as a float.
    #[inline]
    pub fn hi(&self) -> f64 {
        self.max.value()
    }

    /// Width of the range.
    #[inline]
    pub fn span(&self) -> f64 {
        self.hi() - self.lo()
    }

    fn check(&self, field: &'static str) -> Result<(), PresetError> {
        let (min, max) = (self.lo(), self.hi());
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(PresetError::Range { field, min, max });
        }
        Ok(())
    }
}

impl From<[RangeBound; 2]> for LutRange {
    fn from([min, max]: [RangeBound; 2]) -> Self {
        Self { min, max }
    }
}

impl From<LutRange> for [RangeBound; 2] {
    fn from(r: LutRange) -> Self {
        [r.min, r.max]
    }
}

impl fmt::Display for LutRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Configuration of a single LUT write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Free-form preset tag.
    pub format_type: String,
    /// File extension, including the dot.
    pub extension: String,
    /// Input domain sampled by the writers.
    pub input_range: LutRange,
    /// Output domain of the transform.
    pub output_range: LutRange,
    /// 1D/2D LUTs carry `2^output_bitdepth` samples.
    pub output_bitdepth: u32,
    /// 3D LUT axis resolution.
    pub cube_size: usize,
    /// LUT title.
    pub title: String,
    /// LUT comment.
    pub comment: String,
    /// Preset version string.
    pub version: String,
}

/// Partial preset read from YAML; unset keys keep the base value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetOverrides {
    format_type: Option<String>,
    extension: Option<String>,
    input_range: Option<LutRange>,
    output_range: Option<LutRange>,
    output_bitdepth: Option<u32>,
    cube_size: Option<usize>,
    title: Option<String>,
    comment: Option<String>,
    version: Option<String>,
}

impl Preset {
    /// Default preset of the CSP writer.
    pub fn csp_default() -> Self {
        Self {
            format_type: "default".into(),
            extension: ".csp".into(),
            input_range: LutRange::unit(),
            output_range: LutRange::unit(),
            output_bitdepth: 12,
            cube_size: 17,
            title: "Csp LUT".into(),
            comment: "Generated by colorpipe csp writer".into(),
            version: "1".into(),
        }
    }

    /// Default preset of the Scratch writer.
    pub fn scratch_default() -> Self {
        Self {
            format_type: "default".into(),
            extension: ".lut".into(),
            input_range: LutRange::unit(),
            output_range: LutRange::unit(),
            output_bitdepth: 12,
            cube_size: 17,
            title: "Scratch LUT".into(),
            comment: "Generated by colorpipe scratch writer".into(),
            version: "1".into(),
        }
    }

    /// Number of samples of a 1D/2D LUT (`2^output_bitdepth`).
    ///
    /// Saturates at `usize::MAX` for bit depths [`validate_fields`](Self::validate_fields)
    /// rejects.
    #[inline]
    pub fn sample_count(&self) -> usize {
        1usize
            .checked_shl(self.output_bitdepth)
            .unwrap_or(usize::MAX)
    }

    /// Number of grid points of a 3D LUT (`cube_size^3`), `None` on overflow.
    #[inline]
    pub fn cube_entries(&self) -> Option<usize> {
        self.cube_size
            .checked_mul(self.cube_size)?
            .checked_mul(self.cube_size)
    }

    /// Checks the structural constraints of every field.
    pub fn validate_fields(&self) -> Result<(), PresetError> {
        if self.output_bitdepth == 0 || self.output_bitdepth > MAX_BITDEPTH {
            return Err(PresetError::Bitdepth {
                value: self.output_bitdepth,
                max: MAX_BITDEPTH,
            });
        }
        check_cube_size(self.cube_size)?;
        self.input_range.check("input_range")?;
        self.output_range.check("output_range")?;
        Ok(())
    }

    /// Overrides the input range.
    pub fn with_input_range(mut self, range: LutRange) -> Result<Self, PresetError> {
        range.check("input_range")?;
        self.input_range = range;
        Ok(self)
    }

    /// Overrides the output range.
    pub fn with_output_range(mut self, range: LutRange) -> Result<Self, PresetError> {
        range.check("output_range")?;
        self.output_range = range;
        Ok(self)
    }

    /// Overrides the output bit depth.
    pub fn with_bitdepth(mut self, bitdepth: u32) -> Result<Self, PresetError> {
        if bitdepth == 0 || bitdepth > MAX_BITDEPTH {
            return Err(PresetError::Bitdepth {
                value: bitdepth,
                max: MAX_BITDEPTH,
            });
        }
        self.output_bitdepth = bitdepth;
        Ok(self)
    }

    /// Overrides the cube size.
    pub fn with_cube_size(mut self, size: usize) -> Result<Self, PresetError> {
        check_cube_size(size)?;
        self.cube_size = size;
        Ok(self)
    }

    /// Overrides the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Overrides the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Overlays a YAML document on top of `self`.
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML, unknown keys or invalid field values.
    pub fn merge_yaml(self, yaml: &str) -> LutResult<Self> {
        let overrides: PresetOverrides = serde_yaml::from_str(yaml)?;
        let preset = self.apply(overrides);
        preset.validate_fields()?;
        Ok(preset)
    }

    /// Loads a YAML preset file on top of `self`.
    pub fn load_yaml<P: AsRef<Path>>(self, path: P) -> LutResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        self.merge_yaml(&text)
    }

    fn apply(mut self, o: PresetOverrides) -> Self {
        if let Some(v) = o.format_type {
            self.format_type = v;
        }
        if let Some(v) = o.extension {
            self.extension = v;
        }
        if let Some(v) = o.input_range {
            self.input_range = v;
        }
        if let Some(v) = o.output_range {
            self.output_range = v;
        }
        if let Some(v) = o.output_bitdepth {
            self.output_bitdepth = v;
        }
        if let Some(v) = o.cube_size {
            self.cube_size = v;
        }
        if let Some(v) = o.title {
            self.title = v;
        }
        if let Some(v) = o.comment {
            self.comment = v;
        }
        if let Some(v) = o.version {
            self.version = v;
        }
        self
    }
}
