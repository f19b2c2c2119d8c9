//! Implementation of each subcommand

// standard library
use std::path::{Path, PathBuf};

// crate modules
use crate::cli::Format;
use crate::error::Result;

// tomokit modules
use tomokit_pick::vtk::{write_vtk, RecordToVtk};
use tomokit_pick::{
    download_checkpoint, load_membrane_records, ArchiveProvider, Dataset, DatasetProvider,
    LocalProvider, SampledRecord,
};
use tomokit_sample::{Boundary, Order, Sampler, ScaleFactor};
use tomokit_utils::f;
use tomokit_volume::{crop_file, Extents};

// external crates
use log::{info, warn};

pub fn fetch_model(output: &Path) -> Result<()> {
    info!("Downloading checkpoint, this can take a few minutes");
    let path = download_checkpoint(output)?;
    info!("Checkpoint file is stored here: {}", path.display());
    Ok(())
}

pub fn fetch_data(dir: &Path) -> Result<()> {
    let provider = ArchiveProvider::new(Dataset::new(dir));
    provider.prepare()?;

    info!("Done. Files in {}:", dir.display());
    let mut names = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect::<Vec<String>>();
    names.sort();

    for name in names {
        println!("{name}");
    }
    Ok(())
}

pub fn crop(input: &Path, output: &Path, extents: &Extents) -> Result<()> {
    let volume = crop_file(input, output, extents)?;
    info!("Cropped volume\n{volume}");
    Ok(())
}

/// Options of the sample command
#[derive(Debug)]
pub struct SampleOptions {
    pub dir: PathBuf,
    pub dataset: Option<PathBuf>,
    pub membranes: Vec<String>,
    pub scale: f64,
    pub order: Order,
    pub boundary: Boundary,
    pub fetch: bool,
    pub vtk: Option<PathBuf>,
    pub format: Format,
    pub json: Option<PathBuf>,
}

pub fn sample(options: SampleOptions) -> Result<()> {
    let dataset = match &options.dataset {
        Some(path) => Dataset::from_json_file(path)?,
        None => Dataset::new(&options.dir),
    };

    let membranes = if options.membranes.is_empty() {
        dataset.identifiers.clone()
    } else {
        options.membranes.clone()
    };

    // make sure every file is available before any sampling starts
    if options.fetch {
        ArchiveProvider::new(dataset.clone()).fetch_all(&membranes)?;
    } else {
        LocalProvider::new(dataset.clone()).fetch_all(&membranes)?;
    }

    let scale = ScaleFactor::new(options.scale)?;
    let sampler = Sampler::new(options.order, options.boundary);
    info!("Sampling with {}, {} boundary", sampler.order, sampler.boundary);

    let records = load_membrane_records(&dataset, &membranes, scale, &sampler)?;
    for record in &records {
        info!("{record}");
    }

    if let Some(path) = &options.json {
        write_json(&records, path)?;
    }

    if let Some(path) = &options.vtk {
        let vtk = RecordToVtk::new().convert_all(&records);
        write_vtk(vtk, path, options.format.into())?;
        info!("VTK written to {}", path.display());
    }

    if options.json.is_none() && options.vtk.is_none() {
        warn!("Warning: No --json or --vtk output requested");
    }

    Ok(())
}

/// One file for a single record, otherwise one file per membrane
fn write_json(records: &[SampledRecord], path: &Path) -> Result<()> {
    if let [record] = records {
        record.write_json(path)?;
        info!("Record written to {}", path.display());
        return Ok(());
    }

    for record in records {
        let path = suffixed(path, record.identifier.as_deref().unwrap_or("record"));
        record.write_json(&path)?;
        info!("Record written to {}", path.display());
    }
    Ok(())
}

/// `out/records.json` -> `out/records_T1S1M12.json`
fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let name = match path.extension() {
        Some(ext) => f!("{stem}_{suffix}.{}", ext.to_string_lossy()),
        None => f!("{stem}_{suffix}"),
    };
    path.with_file_name(name)
}
