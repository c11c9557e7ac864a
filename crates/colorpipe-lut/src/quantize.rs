//! Integer quantization for Scratch LUTs.

use crate::preset::LutRange;
use crate::{LutError, LutResult};

/// Scales values nominally in `[0, 1]` to `[0, max_value]`, rounded to nearest.
///
/// ```rust
/// use colorpipe_lut::quantize::quantize;
///
/// assert_eq!(quantize(&[0.0, 0.5, 1.0], 2), vec![0, 1, 2]);
/// ```
pub fn quantize(values: &[f64], max_value: u32) -> Vec<i64> {
    let scale = f64::from(max_value);
    values.iter().map(|&v| (v * scale).round() as i64).collect()
}

/// Maps values from `range` to `[0, 1]`.
///
/// A zero-width range maps everything to 0.
pub fn normalize(values: &[f64], range: &LutRange) -> Vec<f64> {
    let (lo, span) = (range.lo(), range.span());
    if span == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|&v| (v - lo) / span).collect()
}

/// Checks that all channels have the length of the first one.
///
/// # Errors
///
/// [`LutError::LengthMismatch`] naming the first offending length.
pub fn check_lengths(channels: &[&[f64]]) -> LutResult<()> {
    let Some(first) = channels.first() else {
        return Ok(());
    };
    let expected = first.len();
    match channels.iter().find(|c| c.len() != expected) {
        Some(c) => Err(LutError::LengthMismatch {
            expected,
            found: c.len(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_rounds_to_nearest() {
        assert_eq!(quantize(&[0.0, 0.5, 1.0], 2), vec![0, 1, 2]);
        assert_eq!(quantize(&[0.0, 0.33, 0.34, 1.0], 3), vec![0, 1, 1, 3]);
        assert_eq!(quantize(&[0.25, 0.75], 4), vec![1, 3]);
    }

    #[test]
    fn quantize_keeps_out_of_range() {
        assert_eq!(quantize(&[-0.5, 1.5], 2), vec![-1, 3]);
    }

    #[test]
    fn normalize_range() {
        let r = LutRange::new(-1.0, 3.0);
        assert_eq!(normalize(&[-1.0, 1.0, 3.0], &r), vec![0.0, 0.5, 1.0]);
        assert_eq!(normalize(&[2.0], &LutRange::new(2.0, 2.0)), vec![0.0]);
    }

    #[test]
    fn lengths() {
        let a: &[f64] = &[0.0, 1.0];
        let b: &[f64] = &[0.0, 1.0];
        let c: &[f64] = &[0.0];
        assert!(check_lengths(&[a, b]).is_ok());
        assert!(check_lengths(&[]).is_ok());
        match check_lengths(&[a, b, c]) {
            Err(LutError::LengthMismatch { expected, found }) => {
                assert_eq!((expected, found), (2, 1));
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }
}
