// standard library
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

// crate modules
use crate::dataset::Dataset;
use crate::error::Result;

// tomokit modules
use tomokit_points::{read_mesh_file, read_star_file};
use tomokit_sample::{PreparedVolume, Sampler, ScaleFactor};
use tomokit_utils::{f, OptionExt, StatsExt, ValueExt};
use tomokit_volume::load_volume;

// external crates
use kdam::par_tqdm;
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

/// Tomogram values sampled at the points of a membrane mesh
///
/// Built fresh by the record functions and never modified afterwards. The
/// `points` are the coordinates that were actually sampled, i.e. after any
/// rescaling. The `positions` come from a separate STAR file and are kept
/// exactly as read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledRecord {
    /// Membrane identifier, if the record came from a [Dataset]
    pub identifier: Option<String>,
    /// Sampled coordinates
    pub points: Vec<[f64; 3]>,
    /// Interpolated tomogram value at every point
    pub tomogram_values: Vec<f64>,
    /// Particle positions, untouched by the scale factor
    pub positions: Vec<[f64; 3]>,
    /// Optional score for every point
    pub scores: Option<Vec<f64>>,
}

impl SampledRecord {
    /// Number of sampled points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no points were sampled
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Write the record as JSON
    ///
    /// Keys are `identifier`, `points`, `tomogram_values`, `positions`, and
    /// `scores`, with missing optional values written as `null`.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(writer, self)?;
        debug!("Record written to {}", path.as_ref().display());
        Ok(())
    }
}

impl std::fmt::Display for SampledRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = f!("Membrane {} {{\n", self.identifier.display_or("(unnamed)"));
        s += &f!("    points: {}\n", self.points.len());
        s += &f!("    positions: {}\n", self.positions.len());
        match self.tomogram_values.try_summary() {
            Ok(summary) => {
                s += &f!("    min value: {}\n", summary.min.sci(5, 2));
                s += &f!("    max value: {}\n", summary.max.sci(5, 2));
                s += &f!("    mean value: {}\n", summary.mean.sci(5, 2));
            }
            Err(e) => s += &f!("    values: {e}\n"),
        }
        s += &f!("    scores: {}\n}}", self.scores.is_some());
        write!(f, "{}", s)
    }
}

/// Load a tomogram and sample it at the mesh points
///
/// Points are divided by `scale_factor` first unless it is exactly 1.0. The
/// positions are passed through unchanged. Values are interpolated with the default
/// [Sampler] (trilinear, edge voxels repeated).
///
/// Argument checks are done before any file is read. Failures of the volume
/// reader or sampler are returned as they are.
///
/// ```rust, no_run
/// # use tomokit_pick::build_sampled_record;
/// let points = vec![[1408.0, 1408.0, 704.0], [1422.08, 1408.0, 704.0]];
/// let record = build_sampled_record(&points, None, &[], "Tomo0001.mrc", 14.08).unwrap();
/// assert_eq!(record.tomogram_values.len(), 2);
/// ```
pub fn build_sampled_record<P: AsRef<Path>>(
    mesh_points: &[[f64; 3]],
    scores: Option<&[f64]>,
    positions: &[[f64; 3]],
    volume_path: P,
    scale_factor: f64,
) -> Result<SampledRecord> {
    check_scores(mesh_points, scores)?;
    let scale = ScaleFactor::new(scale_factor)?;

    let volume = load_volume(volume_path)?;
    assemble(
        &Sampler::default().prepare(&volume),
        mesh_points,
        scores.map(|s| s.to_vec()),
        positions,
        scale,
        None,
    )
}

/// Sample one membrane of a dataset
///
/// The identifier must be one of those listed in the [Dataset]. Reads the
/// tomogram, the membrane mesh, and the STAR positions from the dataset
/// layout.
pub fn load_membrane_record(
    dataset: &Dataset,
    identifier: &str,
    scale: ScaleFactor,
    sampler: &Sampler,
) -> Result<SampledRecord> {
    let paths = dataset.paths(identifier)?;
    let volume = load_volume(&paths.tomogram)?;
    sample_membrane(dataset, &sampler.prepare(&volume), identifier, scale)
}

/// Sample several membranes of a dataset that share one tomogram
///
/// All identifiers are checked before anything is read. The tomogram is
/// loaded, and prefiltered for cubic sampling, once and shared between the
/// membranes, which are sampled in parallel. Records are returned in the order of the identifiers.
///
/// Any failure stops the whole batch, there are no partial results.
pub fn load_membrane_records<S: AsRef<str> + Sync>(
    dataset: &Dataset,
    identifiers: &[S],
    scale: ScaleFactor,
    sampler: &Sampler,
) -> Result<Vec<SampledRecord>> {
    for identifier in identifiers {
        dataset.check_identifier(identifier.as_ref())?;
    }

    let path = dataset.tomogram_path();
    info!("Loading {}", path.display());
    let volume = load_volume(&path)?;
    let prepared = sampler.prepare(&volume);

    let records = par_tqdm!(
        identifiers
            .par_iter()
            .map(|id| sample_membrane(dataset, &prepared, id.as_ref(), scale)),
        bar_format = "Sampling membranes: {count}/{total} [{rate:.2} membranes/s]  "
    )
    .collect::<Result<Vec<SampledRecord>>>();
    eprintln!();

    records
}

/// Read the files of a single membrane and sample a loaded volume
fn sample_membrane(
    dataset: &Dataset,
    volume: &PreparedVolume,
    identifier: &str,
    scale: ScaleFactor,
) -> Result<SampledRecord> {
    let mesh = read_mesh_file(dataset.mesh_path(identifier)?)?;
    let positions = read_star_file(dataset.positions_path(identifier)?)?;
    debug!(
        "{identifier}: {} mesh points, {} positions",
        mesh.len(),
        positions.len()
    );

    assemble(
        volume,
        &mesh.points,
        mesh.scores,
        &positions.positions,
        scale,
        Some(identifier.to_string()),
    )
}

fn assemble(
    volume: &PreparedVolume,
    mesh_points: &[[f64; 3]],
    scores: Option<Vec<f64>>,
    positions: &[[f64; 3]],
    scale: ScaleFactor,
    identifier: Option<String>,
) -> Result<SampledRecord> {
    let points = if scale.is_identity() {
        mesh_points.to_vec()
    } else {
        debug!("Rescaling mesh points by 1/{scale}");
        scale.apply(mesh_points)
    };

    let tomogram_values = volume.sample(&points)?;

    Ok(SampledRecord {
        identifier,
        points,
        tomogram_values,
        positions: positions.to_vec(),
        scores,
    })
}

fn check_scores(points: &[[f64; 3]], scores: Option<&[f64]>) -> Result<()> {
    match scores {
        Some(s) if s.len() != points.len() => Err(tomokit_points::Error::InconsistentLength {
            key: "scores".to_string(),
            expected: points.len(),
            found: s.len(),
        }
        .into()),
        _ => Ok(()),
    }
}
