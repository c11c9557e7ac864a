//! CLI command implementations

pub mod bake;
pub mod inspect;

use anyhow::{Result, anyhow};
use colorpipe_lut::{LutRange, RangeBound};

/// Parse one range bound; integer literals stay integers.
fn parse_bound(s: &str) -> Result<RangeBound> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(RangeBound::Int(i));
    }
    s.parse::<f64>()
        .map(RangeBound::Float)
        .map_err(|e| anyhow!("Invalid range bound '{}': {}", s, e))
}

/// Parse "min,max" into a range
pub fn parse_range(s: &str) -> Result<LutRange> {
    let parts: Vec<&str> = s.split(',').collect();
    match parts.as_slice() {
        [min, max] => Ok(LutRange {
            min: parse_bound(min)?,
            max: parse_bound(max)?,
        }),
        _ => Err(anyhow!("Range must be \"min,max\", got '{}'", s)),
    }
}
