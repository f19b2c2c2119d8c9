//! Integration tests for reading, cropping, and writing volumes

use ndarray::Array3;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use tomokit_volume::{
    crop_file, crop_volume, load_volume, read_header, save_volume, Error, Extents, Header, Mode,
    Volume,
};

#[fixture]
fn scratch() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Float volume with a unique value for every voxel
#[fixture]
fn gradient() -> Volume {
    let array = Array3::from_shape_fn((30, 20, 10), |(x, y, z)| {
        (x as f32) + 100.0 * (y as f32) + 10000.0 * (z as f32)
    });
    Volume::new(array).unwrap().with_voxel_size([4.0, 4.0, 4.0])
}

#[rstest]
fn crop_selects_exact_voxels(gradient: Volume) {
    let extents = Extents::new((5, 15), (2, 9), (3, 4));
    let cropped = crop_volume(&gradient, &extents).unwrap();

    assert_eq!(cropped.shape(), [10, 7, 1]);
    for x in 0..10 {
        for y in 0..7 {
            assert_eq!(
                cropped.get([x, y, 0]),
                gradient.get([x + 5, y + 2, 3]),
                "mismatch at ({x}, {y}, 0)"
            );
        }
    }
}

#[rstest]
fn crop_does_not_modify_input(gradient: Volume) {
    let before = gradient.clone();
    let _ = gradient.crop(&Extents::new((0, 1), (0, 1), (0, 1))).unwrap();
    assert_eq!(gradient, before);
}

#[test]
fn crop_tutorial_extents() {
    let volume = Volume::new(Array3::<i8>::zeros((300, 300, 300))).unwrap();
    let cropped = volume.crop(&Extents::default()).unwrap();
    assert_eq!(cropped.shape(), [100, 100, 100]);
}

#[rstest]
#[case(Extents::new((0, 0), (0, 20), (0, 10)))] // empty x
#[case(Extents::new((0, 30), (4, 4), (0, 10)))] // empty y
#[case(Extents::new((0, 31), (0, 20), (0, 10)))] // end > dim
#[case(Extents::new((0, 30), (0, 20), (-2, 10)))] // negative start
#[case(Extents::new((10, 5), (0, 20), (0, 10)))] // reversed
fn crop_rejects_invalid_extents(gradient: Volume, #[case] extents: Extents) {
    assert!(matches!(
        gradient.crop(&extents),
        Err(Error::ExtentOutOfRange { .. })
    ));
}

#[rstest]
fn float_round_trip(gradient: Volume, scratch: TempDir) {
    let path = scratch.path().join("float.mrc");
    let cropped = gradient.crop(&Extents::new((1, 29), (0, 20), (2, 8))).unwrap();

    save_volume(&cropped, &path).unwrap();
    let loaded = load_volume(&path).unwrap();

    assert_eq!(loaded.data, cropped.data);
    assert_eq!(loaded.mode(), Mode::Float32);
    assert_eq!(loaded.voxel_size, cropped.voxel_size);
    assert_eq!(loaded.origin, cropped.origin);
}

#[rstest]
#[case(Volume::new(Array3::from_shape_fn((7, 5, 3), |(x, y, z)| (x * 15 + y * 3 + z) as i16 - 50)).unwrap())]
#[case(Volume::new(Array3::from_shape_fn((7, 5, 3), |(x, y, z)| (x * 15 + y * 3 + z) as u16 * 100)).unwrap())]
#[case(Volume::new(Array3::from_shape_fn((7, 5, 3), |(x, y, z)| (x + y + z) as i8 - 5)).unwrap())]
fn integer_round_trip(#[case] volume: Volume, scratch: TempDir) {
    let path = scratch.path().join("integer.mrc");
    let cropped = volume.crop(&Extents::new((1, 6), (1, 4), (0, 3))).unwrap();

    save_volume(&cropped, &path).unwrap();
    let loaded = load_volume(&path).unwrap();

    assert_eq!(loaded.data, cropped.data);
    assert_eq!(loaded.mode(), cropped.mode());
}

#[rstest]
fn save_overwrites_existing(gradient: Volume, scratch: TempDir) {
    let path = scratch.path().join("overwrite.mrc");
    std::fs::write(&path, b"not a volume").unwrap();

    save_volume(&gradient, &path).unwrap();
    assert_eq!(load_volume(&path).unwrap(), gradient);
}

#[rstest]
fn repeated_loads_are_identical(gradient: Volume, scratch: TempDir) {
    let path = scratch.path().join("twice.mrc");
    save_volume(&gradient, &path).unwrap();

    assert_eq!(load_volume(&path).unwrap(), load_volume(&path).unwrap());
}

#[rstest]
fn header_only(gradient: Volume, scratch: TempDir) {
    let path = scratch.path().join("header.mrc");
    save_volume(&gradient, &path).unwrap();

    let header = read_header(&path).unwrap();
    assert_eq!(header.dimensions, [30, 20, 10]);
    assert_eq!(header.mode, Mode::Float32);
    assert_eq!(header.dmin, 0.0);
    assert_eq!(header.dmax, 29.0 + 1900.0 + 90000.0);
}

#[rstest]
fn crop_file_writes_output(gradient: Volume, scratch: TempDir) {
    let input = scratch.path().join("input.mrc");
    let output = scratch.path().join("output.mrc");
    save_volume(&gradient, &input).unwrap();

    let extents = Extents::new((10, 20), (10, 20), (0, 10));
    let cropped = crop_file(&input, &output, &extents).unwrap();

    assert_eq!(cropped.shape(), [10, 10, 10]);
    assert_eq!(load_volume(&output).unwrap(), cropped);
}

#[rstest]
fn missing_file(scratch: TempDir) {
    let path = scratch.path().join("missing.mrc");
    assert!(matches!(load_volume(&path), Err(Error::NotFound(_))));
}

#[rstest]
fn not_a_volume(scratch: TempDir) {
    let path = scratch.path().join("text.mrc");
    std::fs::write(&path, "data_\nloop_\n_rlnCoordinateX #1\n").unwrap();
    assert!(matches!(
        load_volume(&path),
        Err(Error::UnexpectedByteLength { .. })
    ));
}

#[rstest]
#[case([i32::MAX, i32::MAX, i32::MAX])]
#[case([i32::MAX, i32::MAX, 4])]
fn oversized_header_dimensions(#[case] dimensions: [i32; 3], scratch: TempDir) {
    let path = scratch.path().join("oversized.mrc");
    let header = Header {
        dimensions,
        ..Default::default()
    };
    std::fs::write(&path, header.to_bytes()).unwrap();

    assert!(matches!(
        load_volume(&path),
        Err(Error::InvalidDimensions(_))
    ));
    assert!(header.data_byte_length().is_err());
}

#[rstest]
fn large_header_without_data(scratch: TempDir) {
    let path = scratch.path().join("truncated.mrc");
    let header = Header {
        dimensions: [1 << 20, 1 << 20, 1 << 20],
        ..Default::default()
    };
    std::fs::write(&path, header.to_bytes()).unwrap();

    assert!(matches!(
        load_volume(&path),
        Err(Error::UnexpectedByteLength { found: 0, .. })
    ));
}

#[rstest]
fn unwritable_destination(gradient: Volume, scratch: TempDir) {
    let path = scratch.path().join("no/such/directory/out.mrc");
    assert!(matches!(
        save_volume(&gradient, &path),
        Err(Error::IOError(_))
    ));
}
