// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// crate modules
use crate::error::{Error, Result};

// external crates
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Points sampled from a membrane surface mesh
///
/// Every point may carry a score, typically the predicted likelihood of a
/// protein at that location. Cluster centres are the representative positions
/// of groups of high scoring points.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct MeshPointSet {
    /// Point coordinates, one `[x, y, z]` per point
    pub points: Vec<[f64; 3]>,
    /// Optional score per point, always the same length as `points`
    pub scores: Option<Vec<f64>>,
    /// Optional cluster centre coordinates
    pub cluster_centers: Option<Vec<[f64; 3]>>,
}

impl MeshPointSet {
    /// Build a point set, checking scores against points
    pub fn new(
        points: Vec<[f64; 3]>,
        scores: Option<Vec<f64>>,
        cluster_centers: Option<Vec<[f64; 3]>>,
    ) -> Result<Self> {
        if let Some(scores) = &scores {
            if scores.len() != points.len() {
                return Err(Error::InconsistentLength {
                    key: "scores".to_string(),
                    expected: points.len(),
                    found: scores.len(),
                });
            }
        }

        Ok(Self {
            points,
            scores,
            cluster_centers,
        })
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if there are no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Raw layout of the mesh container, with every key optional so that
/// absences are reported explicitly
#[derive(Debug, Deserialize)]
pub(crate) struct MeshContainer {
    pub(crate) points: Option<Vec<[f64; 3]>>,
    pub(crate) scores: Option<Vec<f64>>,
    pub(crate) cluster_centers: Option<Vec<[f64; 3]>>,
}

/// Storage format of a mesh file, decided by the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Json,
    Hdf5,
}

impl Container {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ["h5", "hdf5", "hdf"].contains(&ext.to_ascii_lowercase().as_str()) => {
                Self::Hdf5
            }
            _ => Self::Json,
        }
    }
}

/// Read a membrane mesh point set
///
/// Files ending in `.h5`, `.hdf5`, or `.hdf` are read as HDF5 (requires the
/// `hdf5` feature), anything else as JSON. Both hold the same entries:
///
/// | Key               | Content                | Required |
/// | ----------------- | ---------------------- | -------- |
/// | `points`          | `(n, 3)` coordinates   | yes      |
/// | `scores`          | `n` numbers            | no       |
/// | `cluster_centers` | `(m, 3)` coordinates   | no       |
///
/// Any other keys are ignored.
///
/// ```rust, no_run
/// # use tomokit_points::read_mesh_file;
/// let mesh = read_mesh_file("./mesh_data/Tomo0001_T1S1M12.h5").unwrap();
/// println!("{} points", mesh.len());
/// ```
pub fn read_mesh_file<P: AsRef<Path>>(path: P) -> Result<MeshPointSet> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    debug!("Reading mesh points from {}", path.display());
    let container = match Container::from_path(path) {
        Container::Json => read_json(path)?,
        Container::Hdf5 => read_hdf5(path)?,
    };

    let points = container
        .points
        .ok_or_else(|| Error::MissingKey("points".to_string()))?;

    if points.is_empty() {
        warn!("Warning: {} contains no mesh points", path.display());
    }

    MeshPointSet::new(points, container.scores, container.cluster_centers)
}

/// Write a mesh point set readable by [read_mesh_file]
///
/// The format follows the file extension in the same way.
pub fn write_mesh_file<P: AsRef<Path>>(mesh: &MeshPointSet, path: P) -> Result<()> {
    let path = path.as_ref();
    match Container::from_path(path) {
        Container::Json => {
            let writer = std::io::BufWriter::new(File::create(path)?);
            serde_json::to_writer(writer, mesh)?;
        }
        Container::Hdf5 => write_hdf5(mesh, path)?,
    }
    debug!("Mesh points written to {}", path.display());
    Ok(())
}

fn read_json(path: &Path) -> Result<MeshContainer> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(feature = "hdf5")]
fn read_hdf5(path: &Path) -> Result<MeshContainer> {
    crate::h5::read_container(path)
}

#[cfg(not(feature = "hdf5"))]
fn read_hdf5(path: &Path) -> Result<MeshContainer> {
    Err(Error::Hdf5Unsupported(path.to_path_buf()))
}

#[cfg(feature = "hdf5")]
fn write_hdf5(mesh: &MeshPointSet, path: &Path) -> Result<()> {
    crate::h5::write_container(mesh, path)
}

#[cfg(not(feature = "hdf5"))]
fn write_hdf5(_: &MeshPointSet, path: &Path) -> Result<()> {
    Err(Error::Hdf5Unsupported(path.to_path_buf()))
}
