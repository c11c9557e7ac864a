//! End-to-end LUT writes against real files.

use colorpipe_lut::csp::{CspMode, read_csp};
use colorpipe_lut::scratch::read_scratch;
use colorpipe_lut::{
    FnTransform, LutDimension, LutError, LutFormat, LutRange, Preset, write_csp_1d, write_csp_2d,
    write_csp_3d, write_scratch_1d, write_scratch_2d,
};
use std::fmt;
use std::fs;
use tempfile::tempdir;

fn identity(rgb: [f64; 3]) -> [f64; 3] {
    rgb
}

#[derive(Debug)]
struct OutOfGamut;

impl fmt::Display for OutOfGamut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("out of gamut")
    }
}

impl std::error::Error for OutOfGamut {}

#[test]
fn csp_identity_cube() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("identity.csp");
    let preset = Preset::csp_default().with_cube_size(2).unwrap();

    write_csp_3d(&mut FnTransform(identity), &path, &preset).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "3D");
    assert_eq!(lines[15], "2 2 2");
    assert_eq!(lines.len(), 16 + 8);

    let csp = read_csp(&path).unwrap();
    assert_eq!(csp.mode, CspMode::ThreeD);
    assert_eq!(csp.rows.len(), 8);
    for (i, row) in csp.rows.iter().enumerate() {
        let expected = [(i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64];
        assert_eq!(*row, expected, "row {i}");
    }
}

#[test]
fn csp_1d_request_writes_2d() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.csp");
    let b = dir.path().join("b.csp");
    let preset = Preset::csp_default().with_bitdepth(6).unwrap();
    let mut gamma = FnTransform(|rgb: [f64; 3]| rgb.map(|c| c.powf(2.2)));

    write_csp_1d(&mut gamma, &a, &preset).unwrap();
    write_csp_2d(&mut gamma, &b, &preset).unwrap();

    let (a, b) = (fs::read(&a).unwrap(), fs::read(&b).unwrap());
    assert_eq!(a, b);

    let text = String::from_utf8(a).unwrap();
    let rows: Vec<&str> = text.lines().skip(16).collect();
    assert_eq!(rows.len(), 64);
    assert!(rows.iter().all(|r| r.split_whitespace().count() == 3));
}

#[test]
fn csp_rewrite_is_byte_identical() {
    let dir = tempdir().unwrap();
    let preset = Preset::csp_default()
        .with_cube_size(5)
        .unwrap()
        .with_input_range(LutRange::new(-0.25, 2.0))
        .unwrap();
    let mut grade = FnTransform(|[r, g, b]: [f64; 3]| [g, b * 0.5, r + 0.1]);

    let first = dir.path().join("first.csp");
    let second = dir.path().join("second.csp");
    write_csp_3d(&mut grade, &first, &preset).unwrap();
    write_csp_3d(&mut grade, &second, &preset).unwrap();
    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn csp_int_range_creates_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csp");
    let preset = Preset::csp_default()
        .merge_yaml("output_range: [0, 1]\n")
        .unwrap();

    let err = write_csp_3d(&mut FnTransform(identity), &path, &preset).unwrap_err();
    match err {
        LutError::Range { field, message } => {
            assert_eq!(field, "output_range");
            assert!(message.contains("expected to be float"));
        }
        other => panic!("expected range error, got {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn csp_huge_output_range_still_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hdr.csp");
    let preset = Preset::csp_default()
        .with_cube_size(2)
        .unwrap()
        .with_output_range(LutRange::new(0.0, 1.0e6))
        .unwrap();
    let mut scale = FnTransform(|rgb: [f64; 3]| rgb.map(|c| c * 1.0e6));

    write_csp_3d(&mut scale, &path, &preset).unwrap();

    let csp = read_csp(&path).unwrap();
    assert_eq!(csp.prelut[0].outputs, vec![0.0, 1.0e6]);
    assert_eq!(csp.rows.len(), 8);
    assert_eq!(csp.rows[7], [1.0e6; 3]);
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().nth(5), Some("0.0 1000000.0"));
}

#[test]
fn transform_error_reaches_caller() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fail.csp");
    let preset = Preset::csp_default().with_cube_size(3).unwrap();
    let mut failing = |rgb: [f64; 3]| if rgb[0] > 0.5 { Err(OutOfGamut) } else { Ok(rgb) };

    let err = write_csp_3d(&mut failing, &path, &preset).unwrap_err();
    let LutError::Transform(source) = err else {
        panic!("expected transform error");
    };
    assert!(source.downcast_ref::<OutOfGamut>().is_some());
    assert!(!path.exists());
}

#[test]
fn scratch_1d_two_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ramp.lut");

    write_scratch_1d(&path, &[0.0, 1.0]).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("# Scratch LUT generated by"));
    assert_eq!(&lines[1..], &["LUT: 1 2", "      0", "      1"]);
}

#[test]
fn scratch_mismatch_leaves_no_data() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.lut");
    let x = [0.0, 0.5, 1.0];
    let y = [0.0, 1.0];

    let err = write_scratch_2d(&path, &x, Some(&y[..]), Some(&x[..])).unwrap_err();
    assert!(matches!(err, LutError::LengthMismatch { expected: 3, found: 2 }));

    // file was opened, then closed before the error surfaced
    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("LUT:"));
    assert!(text.lines().all(|l| l.starts_with('#')));
}

#[test]
fn scratch_bake_from_preset() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("baked.lut");
    let format = LutFormat::Scratch;
    let preset = format
        .default_preset()
        .with_bitdepth(2)
        .unwrap()
        .with_output_range(LutRange::new(0.0, 2.0))
        .unwrap();
    let mut double = FnTransform(|rgb: [f64; 3]| rgb.map(|c| c * 2.0));

    format
        .writer()
        .write(LutDimension::TwoD, &mut double, &path, &preset)
        .unwrap();

    let lut = read_scratch(&path).unwrap();
    assert_eq!(lut.dimension, 3);
    assert_eq!(lut.count, 4);
    for channel in &lut.channels {
        assert_eq!(channel, &vec![0, 1, 2, 3]);
    }

    format
        .writer()
        .write(LutDimension::OneD, &mut double, &path, &preset)
        .unwrap();
    let lut = read_scratch(&path).unwrap();
    assert_eq!(lut.dimension, 1);
    assert_eq!(lut.channels, vec![vec![0, 1, 2, 3]]);
}

#[test]
fn yaml_preset_drives_csp() {
    let dir = tempdir().unwrap();
    let preset_path = dir.path().join("preset.yaml");
    fs::write(
        &preset_path,
        "input_range: [-0.25, 2.0]\noutput_bitdepth: 3\ntitle: wide\n",
    )
    .unwrap();
    let preset = Preset::csp_default().load_yaml(&preset_path).unwrap();

    let out = dir.path().join("wide.csp");
    LutFormat::Csp
        .writer()
        .write(LutDimension::TwoD, &mut FnTransform(identity), &out, &preset)
        .unwrap();

    let csp = read_csp(&out).unwrap();
    assert_eq!(csp.mode, CspMode::OneD);
    assert_eq!(csp.dims, vec![8]);
    assert_eq!(csp.prelut[0].inputs, vec![-0.25, 2.0]);
    assert_eq!(csp.prelut[0].outputs, vec![0.0, 1.0]);
    assert_eq!(csp.rows[0], [-0.25; 3]);
    assert_eq!(csp.rows[7], [2.0; 3]);
}
