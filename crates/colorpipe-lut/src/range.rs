//! Range checks run before a CSP LUT is written.
//!
//! CSP headers carry float ranges. A range whose bounds were both written
//! as integers (`[0, 1]`) is rejected; a suspiciously large upper bound
//! only produces a warning.

use crate::preset::{LutRange, Preset};
use crate::{LutError, LutResult};
use tracing::{error, warn};

/// Upper bound above which a range is reported as suspicious.
pub const FLOAT_BOUNDARY: f64 = 100_000.0;

fn range_message(field: &str, range: &LutRange) -> String {
    format!(
        "CSP {} is expected to be float. Ex: [0.0, 1.0] or [-0.25, 2.0].\nYour range {}",
        field, range
    )
}

/// Warns when the upper bound exceeds [`FLOAT_BOUNDARY`].
///
/// Returns true if a warning was emitted.
pub fn check_range_magnitude(field: &str, range: &LutRange) -> bool {
    if range.hi() > FLOAT_BOUNDARY {
        warn!(
            field,
            max = range.hi(),
            "{} seems too big !\nPlease check this, if the LUT isn't what you expected",
            range_message(field, range)
        );
        return true;
    }
    false
}

/// Validates the input and output ranges of `preset`.
///
/// # Errors
///
/// [`LutError::Range`] if a range has two integer bounds.
pub fn validate_ranges(preset: &Preset) -> LutResult<()> {
    for (field, range) in [
        ("input_range", &preset.input_range),
        ("output_range", &preset.output_range),
    ] {
        if range.is_int() {
            let message = range_message(field, range);
            error!("{}", message);
            return Err(LutError::Range { field, message });
        }
        check_range_magnitude(field, range);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ranges(input: LutRange, output: LutRange) -> Preset {
        Preset {
            input_range: input,
            output_range: output,
            ..Preset::csp_default()
        }
    }

    #[test]
    fn float_ranges_pass() {
        for (a, b) in [(0.0, 1.0), (-0.25, 2.0), (0.0, 65504.0), (-1.0, -0.5)] {
            let p = with_ranges(LutRange::new(a, b), LutRange::new(a, b));
            assert!(validate_ranges(&p).is_ok(), "[{a}, {b}]");
        }
    }

    #[test]
    fn int_input_range_fails() {
        let p = with_ranges(LutRange::int(0, 1), LutRange::unit());
        match validate_ranges(&p) {
            Err(LutError::Range { field, message }) => {
                assert_eq!(field, "input_range");
                assert!(message.contains("input_range"));
                assert!(message.contains("[0, 1]"));
            }
            other => panic!("expected range error, got {:?}", other),
        }
    }

    #[test]
    fn int_output_range_fails() {
        let p = with_ranges(LutRange::unit(), LutRange::int(0, 1023));
        let err = validate_ranges(&p).unwrap_err();
        assert!(matches!(err, LutError::Range { field: "output_range", .. }));
        assert!(err.to_string().contains("[0, 1023]"));
    }

    #[test]
    fn mixed_range_is_float() {
        let mixed = LutRange {
            min: 0i64.into(),
            max: 1.0f64.into(),
        };
        let p = with_ranges(mixed, LutRange::unit());
        assert!(validate_ranges(&p).is_ok());
    }

    #[test]
    fn big_range_only_warns() {
        let big = LutRange::new(0.0, 1.0e6);
        assert!(check_range_magnitude("output_range", &big));
        assert!(!check_range_magnitude("output_range", &LutRange::unit()));
        assert!(validate_ranges(&with_ranges(LutRange::unit(), big)).is_ok());
    }
}
