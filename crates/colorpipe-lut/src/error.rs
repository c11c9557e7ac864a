//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Error returned by a caller-supplied color transform.
pub type TransformError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while baking or reading LUTs.
#[derive(Debug, Error)]
pub enum LutError {
    /// Range rejected by a format (e.g. integer range for CSP).
    #[error("{message}")]
    Range {
        /// Preset field holding the range (`input_range` or `output_range`).
        field: &'static str,
        /// Human readable message naming the field and the received value.
        message: String,
    },

    /// Preset field failed construction-time validation.
    #[error("invalid preset: {0}")]
    Preset(#[from] PresetError),

    /// Channel arrays passed together have different lengths.
    #[error("channel length mismatch: expected {expected} values, found {found}")]
    LengthMismatch {
        /// Length of the first channel.
        expected: usize,
        /// Length of the offending channel.
        found: usize,
    },

    /// The caller-supplied transform failed.
    #[error("transform failed: {0}")]
    Transform(#[source] TransformError),

    /// Operation not available for this format.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Parse error when loading LUT files.
    #[error("parse error: {0}")]
    ParseError(String),

    /// YAML preset could not be deserialized.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid preset field values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PresetError {
    /// Output bit depth out of the supported span.
    #[error("output_bitdepth must be in 1..={max}, got {value}")]
    Bitdepth {
        /// Received bit depth.
        value: u32,
        /// Largest accepted bit depth.
        max: u32,
    },

    /// Cube size outside `2..=max`.
    #[error("cube_size must be in 2..={max}, got {value}")]
    CubeSize {
        /// Received cube size.
        value: usize,
        /// Largest accepted cube size.
        max: usize,
    },

    /// Range with min > max or non-finite bounds.
    #[error("invalid {field}: [{min}, {max}]")]
    Range {
        /// Preset field holding the range.
        field: &'static str,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}
