//! # colorpipe-lut
//!
//! Bakes color transforms into lookup table files.
//!
//! A caller supplies a [`ColorTransform`] and a [`Preset`]; the writers
//! sample the transform on a regular grid and serialize the result.
//!
//! # Supported Formats
//!
//! - `.csp` - Cinespace LUTs, 2D curves and 3D cubes ([`csp`] module)
//! - Scratch - integer-quantized 1D/2D curves ([`scratch`] module)
//!
//! # Usage
//!
//! ```rust,no_run
//! use colorpipe_lut::{csp, FnTransform, Preset};
//! use std::path::Path;
//!
//! let preset = Preset::csp_default().with_cube_size(17).unwrap();
//! let mut invert = FnTransform(|rgb: [f64; 3]| rgb.map(|c| 1.0 - c));
//! csp::write_csp_3d(&mut invert, Path::new("invert.csp"), &preset).unwrap();
//! ```
//!
//! # Pipeline
//!
//! 1. [`range`] - CSP range checks (float ranges, magnitude warning)
//! 2. [`sample`] - ramp and cube sampling
//! 3. [`quantize`] - integer scaling for Scratch
//! 4. [`csp`] / [`scratch`] - text encoders
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//! - [`serde`] / [`serde_yaml`] - YAML presets
//! - [`tracing`] - Export, warning and error events

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod csp;
mod error;
pub mod format;
pub mod preset;
pub mod quantize;
pub mod range;
pub mod sample;
pub mod scratch;

pub use csp::{read_csp, validate_csp, write_csp_1d, write_csp_2d, write_csp_3d};
pub use error::{LutError, LutResult, PresetError, TransformError};
pub use format::{CspWriter, LutDimension, LutFormat, LutWriter, ScratchWriter};
pub use preset::{LutRange, MAX_BITDEPTH, MAX_CUBE_SIZE, Preset, RangeBound};
pub use range::{FLOAT_BOUNDARY, validate_ranges};
pub use sample::{ColorTransform, FnTransform, Sample, sample_1d, sample_3d};
pub use scratch::{read_scratch, write_scratch_1d, write_scratch_2d};
