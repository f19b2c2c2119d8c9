use std::path::{Path, PathBuf};

use rstest::{fixture, rstest};
use tempfile::TempDir;
use tomokit_points::*;

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

#[fixture]
fn scratch() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[rstest]
fn mesh_file() {
    let mesh = read_mesh_file(data("Tomo0001_T1S1M12.json")).unwrap();
    assert_eq!(mesh.len(), 4);
    assert_eq!(mesh.points[1], [88.5, 111.0, 40.0]);
    assert_eq!(mesh.scores, Some(vec![0.91, 0.12, 0.66, 0.03]));
    assert_eq!(mesh.cluster_centers.unwrap().len(), 2);
}

#[rstest]
fn mesh_optional_keys(scratch: TempDir) {
    let path = write(&scratch, "mesh.json", r#"{"points": [[1, 2, 3]]}"#);
    let mesh = read_mesh_file(path).unwrap();
    assert_eq!(mesh.points, vec![[1.0, 2.0, 3.0]]);
    assert_eq!(mesh.scores, None);
    assert_eq!(mesh.cluster_centers, None);
}

#[rstest]
fn mesh_missing_points(scratch: TempDir) {
    let path = write(&scratch, "mesh.json", r#"{"scores": [0.5]}"#);
    let result = read_mesh_file(path);
    assert!(matches!(result, Err(Error::MissingKey(k)) if k == "points"));
}

#[rstest]
fn mesh_inconsistent_scores(scratch: TempDir) {
    let path = write(
        &scratch,
        "mesh.json",
        r#"{"points": [[1, 2, 3], [4, 5, 6]], "scores": [0.5]}"#,
    );
    let result = read_mesh_file(path);
    assert!(matches!(
        result,
        Err(Error::InconsistentLength {
            expected: 2,
            found: 1,
            ..
        })
    ));
}

#[rstest]
#[case(r#"{"points": [[1, 2]]}"#)]
#[case(r#"{"points": "none"}"#)]
#[case("not json")]
fn mesh_malformed(scratch: TempDir, #[case] content: &str) {
    let path = write(&scratch, "mesh.json", content);
    assert!(matches!(read_mesh_file(path), Err(Error::Json(_))));
}

#[rstest]
fn mesh_not_found(scratch: TempDir) {
    let path = scratch.path().join("missing.json");
    assert!(matches!(read_mesh_file(path), Err(Error::NotFound(_))));
}

#[rstest]
fn mesh_write_and_read(scratch: TempDir) {
    let mesh = MeshPointSet::new(
        vec![[1.5, 2.5, 3.5], [4.0, 5.0, 6.0]],
        Some(vec![0.25, 0.75]),
        None,
    )
    .unwrap();

    let path = scratch.path().join("mesh.json");
    write_mesh_file(&mesh, &path).unwrap();
    assert_eq!(read_mesh_file(&path).unwrap(), mesh);
}

#[cfg(feature = "hdf5")]
#[rstest]
fn mesh_hdf5_container(scratch: TempDir) {
    let path = scratch.path().join("Tomo0001_T1S1M12.h5");
    let mesh = MeshPointSet::new(
        vec![[1.0, 2.0, 3.0], [4.5, 5.5, 6.5]],
        Some(vec![0.25, 0.75]),
        Some(vec![[2.75, 3.75, 4.75]]),
    )
    .unwrap();

    write_mesh_file(&mesh, &path).unwrap();
    assert_eq!(read_mesh_file(&path).unwrap(), mesh);
}

#[cfg(feature = "hdf5")]
#[rstest]
fn mesh_hdf5_without_points(scratch: TempDir) {
    let path = scratch.path().join("scores_only.h5");
    let file = hdf5::File::create(&path).unwrap();
    file.new_dataset::<f64>()
        .shape(2)
        .create("scores")
        .unwrap()
        .write_raw(&[0.5, 0.5][..])
        .unwrap();
    drop(file);

    assert!(matches!(
        read_mesh_file(&path),
        Err(Error::MissingKey(key)) if key == "points"
    ));
}

#[cfg(not(feature = "hdf5"))]
#[rstest]
fn mesh_hdf5_needs_feature(scratch: TempDir) {
    let path = write(&scratch, "Tomo0001_T1S1M12.h5", "\u{89}HDF");
    assert!(matches!(
        read_mesh_file(&path),
        Err(Error::Hdf5Unsupported(p)) if p == path
    ));
}

#[rstest]
fn star_file() {
    let list = read_star_file(data("Tomo0001_T1S1M12.star")).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.positions[0], [101.25, 96.0, 44.5]);
    assert_eq!(list.positions[2], [130.0, 75.5, 52.0]);
}

#[rstest]
fn star_not_found(scratch: TempDir) {
    let path = scratch.path().join("missing.star");
    assert!(matches!(read_star_file(path), Err(Error::NotFound(_))));
}

#[rstest]
fn star_missing_columns(scratch: TempDir) {
    let path = write(
        &scratch,
        "positions.star",
        "data_\nloop_\n_rlnCoordinateX #1\n_rlnCoordinateY #2\n1 2\n",
    );
    assert!(matches!(read_star_file(path), Err(Error::MissingColumn(_))));
}
