//! Built-in curves the CLI can bake.
//!
//! These are simple per-channel transfer functions for producing test and
//! utility LUTs; real color-management transforms come from elsewhere.

use anyhow::{Result, anyhow, bail};
use colorpipe_lut::{ColorTransform, TransformError};
use std::fmt;
use std::str::FromStr;

/// A per-channel curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// Pass-through.
    Identity,
    /// `v^g`.
    Gamma(f64),
    /// sRGB OETF, linear to encoded.
    SrgbEncode,
    /// sRGB EOTF, encoded to linear.
    SrgbDecode,
}

/// sRGB EOTF (IEC 61966-2-1).
fn srgb_eotf(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF (IEC 61966-2-1).
fn srgb_oetf(l: f64) -> f64 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

impl Curve {
    /// Evaluates the curve on one channel value.
    pub fn eval(self, v: f64) -> f64 {
        match self {
            Curve::Identity => v,
            Curve::Gamma(g) => v.powf(g),
            Curve::SrgbEncode => srgb_oetf(v),
            Curve::SrgbDecode => srgb_eotf(v),
        }
    }
}

impl ColorTransform for Curve {
    /// Fails on non-finite output, e.g. a fractional gamma of a negative input.
    fn apply_rgb(&mut self, rgb: [f64; 3]) -> Result<[f64; 3], TransformError> {
        let out = rgb.map(|c| self.eval(c));
        if out.iter().any(|c| !c.is_finite()) {
            return Err(format!("{} is undefined at {:?}", self, rgb).into());
        }
        Ok(out)
    }
}

impl FromStr for Curve {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        if let Some(g) = s.strip_prefix("gamma:") {
            let g: f64 = g
                .parse()
                .map_err(|e| anyhow!("Invalid gamma '{}': {}", g, e))?;
            if !(g.is_finite() && g > 0.0) {
                bail!("Gamma must be positive, got {}", g);
            }
            return Ok(Curve::Gamma(g));
        }
        match s.as_str() {
            "identity" | "linear" => Ok(Curve::Identity),
            "srgb-encode" | "srgb" => Ok(Curve::SrgbEncode),
            "srgb-decode" => Ok(Curve::SrgbDecode),
            other => bail!("Unknown curve: {}", other),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::Identity => write!(f, "identity"),
            Curve::Gamma(g) => write!(f, "gamma:{}", g),
            Curve::SrgbEncode => write!(f, "srgb-encode"),
            Curve::SrgbDecode => write!(f, "srgb-decode"),
        }
    }
}
