//! Format selection and the common writer interface.
//!
//! Each format is a stateless writer implementing [`LutWriter`]. Pick one
//! explicitly with [`LutFormat`]:
//!
//! ```rust,no_run
//! use colorpipe_lut::{FnTransform, LutDimension, LutFormat};
//! use std::path::Path;
//!
//! let format: LutFormat = "csp".parse().unwrap();
//! let preset = format.default_preset().with_cube_size(33).unwrap();
//! let mut gamma = FnTransform(|rgb: [f64; 3]| rgb.map(|c| c.powf(1.0 / 2.2)));
//! format
//!     .writer()
//!     .write(LutDimension::ThreeD, &mut gamma, Path::new("gamma.csp"), &preset)
//!     .unwrap();
//! ```

use crate::csp::{validate_csp, write_csp_1d, write_csp_2d, write_csp_3d};
use crate::preset::Preset;
use crate::sample::ColorTransform;
use crate::scratch::{bake_scratch_1d, bake_scratch_2d};
use crate::{LutError, LutResult};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// LUT dimensionality requested from a writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutDimension {
    /// One curve.
    OneD,
    /// One curve per channel.
    TwoD,
    /// Color cube.
    ThreeD,
}

impl FromStr for LutDimension {
    type Err = LutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1d" | "1" => Ok(Self::OneD),
            "2d" | "2" => Ok(Self::TwoD),
            "3d" | "3" => Ok(Self::ThreeD),
            _ => Err(LutError::Unsupported(format!("LUT dimension '{}'", s))),
        }
    }
}

impl fmt::Display for LutDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OneD => "1D",
            Self::TwoD => "2D",
            Self::ThreeD => "3D",
        })
    }
}

/// Common interface of the LUT writers.
pub trait LutWriter {
    /// Short format name.
    fn name(&self) -> &'static str;

    /// Default preset of the format.
    fn default_preset(&self) -> Preset;

    /// Format-specific preset checks, run before any sampling.
    fn validate(&self, preset: &Preset) -> LutResult<()>;

    /// Writes a 1D LUT.
    fn write_1d(
        &self,
        transform: &mut dyn ColorTransform,
        path: &Path,
        preset: &Preset,
    ) -> LutResult<()>;

    /// Writes a 2D LUT (one curve per channel).
    fn write_2d(
        &self,
        transform: &mut dyn ColorTransform,
        path: &Path,
        preset: &Preset,
    ) -> LutResult<()>;

    /// Writes a 3D LUT.
    fn write_3d(
        &self,
        transform: &mut dyn ColorTransform,
        path: &Path,
        preset: &Preset,
    ) -> LutResult<()>;

    /// Dispatches on `dim`.
    fn write(
        &self,
        dim: LutDimension,
        transform: &mut dyn ColorTransform,
        path: &Path,
        preset: &Preset,
    ) -> LutResult<()> {
        match dim {
            LutDimension::OneD => self.write_1d(transform, path, preset),
            LutDimension::TwoD => self.write_2d(transform, path, preset),
            LutDimension::ThreeD => self.write_3d(transform, path, preset),
        }
    }
}

/// Cinespace writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CspWriter;

impl LutWriter for CspWriter {
    fn name(&self) -> &'static str {
        "csp"
    }

    fn default_preset(&self) -> Preset {
        Preset::csp_default()
    }

    fn validate(&self, preset: &Preset) -> LutResult<()> {
        validate_csp(preset)
    }

    fn write_1d(
        &self,
        transform: &mut dyn ColorTransform,
        path: &Path,
        preset: &Preset,
    ) -> LutResult<()> {
        write_csp_1d(transform, path, preset)
    }

    fn write_2d(
        &self,
        transform: &mut dyn ColorTransform,
        path: &Path,
        preset: &Preset,
    ) -> LutResult<()> {
        write_csp_2d(transform, path, preset)
    }

    fn write_3d(
        &self,
        transform: &mut dyn ColorTransform,
        path: &Path,
        preset: &Preset,
    ) -> LutResult<()> {
        write_csp_3d(transform, path, preset)
    }
}

/// Scratch writer. Only 1D and 2D LUTs exist in this format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScratchWriter;

impl LutWriter for ScratchWriter {
    fn name(&self) -> &'static str {
        "scratch"
    }

    fn default_preset(&self) -> Preset {
        Preset::scratch_default()
    }

    fn validate(&self, preset: &Preset) -> LutResult<()> {
        Ok(preset.validate_fields()?)
    }

    fn write_1d(
        &self,
        transform: &mut dyn ColorTransform,
        path: &Path,
        preset: &Preset,
    ) -> LutResult<()> {
        bake_scratch_1d(transform, path, preset)
    }

    fn write_2d(
        &self,
        transform: &mut dyn ColorTransform,
        path: &Path,
        preset: &Preset,
    ) -> LutResult<()> {
        bake_scratch_2d(transform, path, preset)
    }

    fn write_3d(&self, _: &mut dyn ColorTransform, _: &Path, _: &Preset) -> LutResult<()> {
        Err(LutError::Unsupported("3D LUT in Scratch format".into()))
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutFormat {
    /// Cinespace `.csp`.
    Csp,
    /// Scratch `.lut`.
    Scratch,
}

impl LutFormat {
    /// Writer for this format.
    pub fn writer(self) -> &'static dyn LutWriter {
        match self {
            Self::Csp => &CspWriter,
            Self::Scratch => &ScratchWriter,
        }
    }

    /// Default preset for this format.
    pub fn default_preset(self) -> Preset {
        self.writer().default_preset()
    }

    /// Guesses the format from a file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csp" => Some(Self::Csp),
            "lut" | "scratch" => Some(Self::Scratch),
            _ => None,
        }
    }
}

impl FromStr for LutFormat {
    type Err = LutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csp" => Ok(Self::Csp),
            "scratch" => Ok(Self::Scratch),
            _ => Err(LutError::Unsupported(format!("LUT format '{}'", s))),
        }
    }
}

impl fmt::Display for LutFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.writer().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::LutRange;
    use crate::sample::FnTransform;

    #[test]
    fn parse_names() {
        assert_eq!("CSP".parse::<LutFormat>().unwrap(), LutFormat::Csp);
        assert_eq!("scratch".parse::<LutFormat>().unwrap(), LutFormat::Scratch);
        assert!("cube".parse::<LutFormat>().is_err());
        assert_eq!("3d".parse::<LutDimension>().unwrap(), LutDimension::ThreeD);
        assert!("4d".parse::<LutDimension>().is_err());
    }

    #[test]
    fn extension_lookup() {
        assert_eq!(LutFormat::from_extension(Path::new("a/b.CSP")), Some(LutFormat::Csp));
        assert_eq!(LutFormat::from_extension(Path::new("b.lut")), Some(LutFormat::Scratch));
        assert_eq!(LutFormat::from_extension(Path::new("b")), None);
    }

    #[test]
    fn default_presets_per_format() {
        assert_eq!(LutFormat::Csp.default_preset().extension, ".csp");
        assert_eq!(LutFormat::Scratch.default_preset().extension, ".lut");
        assert_eq!(LutFormat::Scratch.to_string(), "scratch");
    }

    #[test]
    fn csp_validate_rejects_int_range() {
        let preset = Preset {
            input_range: LutRange::int(0, 1),
            ..Preset::csp_default()
        };
        assert!(CspWriter.validate(&preset).is_err());
        assert!(ScratchWriter.validate(&preset).is_ok());

        for bad in [
            Preset {
                output_bitdepth: 0,
                ..Preset::csp_default()
            },
            Preset {
                output_bitdepth: 64,
                ..Preset::csp_default()
            },
            Preset {
                cube_size: 1,
                ..Preset::csp_default()
            },
        ] {
            assert!(matches!(CspWriter.validate(&bad), Err(LutError::Preset(_))));
            assert!(matches!(ScratchWriter.validate(&bad), Err(LutError::Preset(_))));
        }
    }

    #[test]
    fn scratch_has_no_cube() {
        let mut t = FnTransform(|rgb: [f64; 3]| rgb);
        let err = ScratchWriter
            .write_3d(&mut t, Path::new("unused.lut"), &Preset::scratch_default())
            .unwrap_err();
        assert!(matches!(err, LutError::Unsupported(_)));
    }
}
