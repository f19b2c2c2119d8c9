//! HDF5 mesh containers
//!
//! The membrane segmentation tools store mesh points as a `points` dataset of
//! shape `(n, 3)` with optional `scores` `(n,)` and `cluster_centers` `(m, 3)`
//! datasets at the root of the file. Other datasets (faces, normals, ...) are
//! ignored.

// standard library
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::mesh::{MeshContainer, MeshPointSet};

// external crates
use hdf5::{Dataset, File};
use log::trace;

/// Read the known datasets of a mesh file, leaving absent ones as `None`
pub(crate) fn read_container(path: &Path) -> Result<MeshContainer> {
    let file = File::open(path)?;
    Ok(MeshContainer {
        points: read_coordinates(&file, "points")?,
        scores: read_values(&file, "scores")?,
        cluster_centers: read_coordinates(&file, "cluster_centers")?,
    })
}

/// Write a point set with the same layout as [read_container] expects
pub(crate) fn write_container(mesh: &MeshPointSet, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_coordinates(&file, "points", &mesh.points)?;

    if let Some(scores) = &mesh.scores {
        file.new_dataset::<f64>()
            .shape(scores.len())
            .create("scores")?
            .write_raw(scores)?;
    }

    if let Some(centers) = &mesh.cluster_centers {
        write_coordinates(&file, "cluster_centers", centers)?;
    }

    Ok(())
}

fn dataset(file: &File, key: &str) -> Result<Option<Dataset>> {
    if !file.link_exists(key) {
        trace!("No \"{key}\" dataset");
        return Ok(None);
    }
    Ok(Some(file.dataset(key)?))
}

fn read_coordinates(file: &File, key: &str) -> Result<Option<Vec<[f64; 3]>>> {
    let Some(dataset) = dataset(file, key)? else {
        return Ok(None);
    };

    let shape = dataset.shape();
    if shape.len() != 2 || shape[1] != 3 {
        return Err(Error::InvalidShape {
            key: key.to_string(),
            shape,
        });
    }

    // row major, so every chunk of three is one coordinate
    let flat = dataset.read_raw::<f64>()?;
    Ok(Some(
        flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect(),
    ))
}

fn read_values(file: &File, key: &str) -> Result<Option<Vec<f64>>> {
    let Some(dataset) = dataset(file, key)? else {
        return Ok(None);
    };

    let shape = dataset.shape();
    if shape.len() != 1 {
        return Err(Error::InvalidShape {
            key: key.to_string(),
            shape,
        });
    }

    Ok(Some(dataset.read_raw::<f64>()?))
}

fn write_coordinates(file: &File, key: &str, coordinates: &[[f64; 3]]) -> Result<()> {
    let flat = coordinates.iter().flatten().copied().collect::<Vec<f64>>();
    file.new_dataset::<f64>()
        .shape((coordinates.len(), 3))
        .create(key)?
        .write_raw(&flat)?;
    Ok(())
}
