//! Write operations for MRC volumes

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::header::Header;
use crate::volume::{in_file_order, Volume, VolumeData, Voxel};
use crate::{load_volume, Extents};

// tomokit modules
use tomokit_utils::{StatsExt, Summary};

// external crates
use log::{info, warn};
use ndarray::Array3;

/// Label written to every file produced by this crate
const LABEL: &str = "tomokit: volume written by tomokit-volume";

/// Write a [Volume] to an MRC2014 file
///
/// Any existing file at `path` is overwritten. The data mode follows the
/// element type of the volume, and the header statistics are recalculated from
/// the voxel values.
///
/// ```rust, no_run
/// # use tomokit_volume::{load_volume, save_volume, Extents};
/// let tomogram = load_volume("./Tomo0001.mrc").unwrap();
/// let cropped = tomogram.crop(&Extents::default()).unwrap();
/// save_volume(&cropped, "./Tomo0001_cropped.mrc").unwrap();
/// ```
pub fn save_volume<P: AsRef<Path>>(volume: &Volume, path: P) -> Result<()> {
    let mut writer = init_writer(path)?;
    writer.write_all(&header_for(volume).to_bytes())?;
    writer.write_all(&encode_data(&volume.data))?;
    writer.flush()?;
    Ok(())
}

/// Crop a tomogram file and write the result
///
/// Convenience for the common load, crop, save sequence. The cropped volume is
/// returned for further use.
///
/// ```rust, no_run
/// # use tomokit_volume::{crop_file, Extents};
/// let extents = Extents::new((100, 200), (100, 200), (100, 200));
/// let cropped = crop_file("./Tomo0001.mrc", "./Tomo0001_cropped.mrc", &extents).unwrap();
/// assert_eq!(cropped.shape(), [100, 100, 100]);
/// ```
pub fn crop_file<P, Q>(input: P, output: Q, extents: &Extents) -> Result<Volume>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let volume = load_volume(&input)?;
    let cropped = volume.crop(extents)?;
    save_volume(&cropped, &output)?;
    info!(
        "Cropped {} [{extents}] to {}",
        input.as_ref().display(),
        output.as_ref().display()
    );
    Ok(cropped)
}

/// Build a header describing the volume
pub(crate) fn header_for(volume: &Volume) -> Header {
    let shape = volume.shape();
    let summary = summarise(&volume.data);

    let mut cell_lengths = [0.0; 3];
    for axis in 0..3 {
        cell_lengths[axis] = shape[axis] as f32 * volume.voxel_size[axis];
    }

    Header {
        dimensions: shape.map(|n| n as i32),
        mode: volume.mode(),
        sampling: shape.map(|n| n as i32),
        cell_lengths,
        dmin: summary.min as f32,
        dmax: summary.max as f32,
        dmean: summary.mean as f32,
        rms: summary.rms as f32,
        origin: volume.origin,
        labels: vec![LABEL.to_string()],
        ..Default::default()
    }
}

/// Header statistics, zeroed if the data contain undefined values
fn summarise(data: &VolumeData) -> Summary {
    let summary = match data {
        VolumeData::Int8(a) => summarise_array(a),
        VolumeData::Int16(a) => summarise_array(a),
        VolumeData::Float32(a) => summarise_array(a),
        VolumeData::Uint16(a) => summarise_array(a),
    };

    summary.unwrap_or_else(|e| {
        warn!("Unable to summarise voxel values ({e}), header statistics set to 0");
        Summary::default()
    })
}

fn summarise_array<T: Voxel>(array: &Array3<T>) -> tomokit_utils::Result<Summary> {
    let standard = array.as_standard_layout();
    match standard.as_slice() {
        Some(values) => values.try_summary(),
        None => standard.iter().copied().collect::<Vec<T>>().try_summary(),
    }
}

/// Encode voxel values in file order
fn encode_data(data: &VolumeData) -> Vec<u8> {
    match data {
        VolumeData::Int8(a) => encode_array(a),
        VolumeData::Int16(a) => encode_array(a),
        VolumeData::Float32(a) => encode_array(a),
        VolumeData::Uint16(a) => encode_array(a),
    }
}

fn encode_array<T: Voxel>(array: &Array3<T>) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(array.len() * T::MODE.byte_size());
    for value in in_file_order(array).iter() {
        value.encode(&mut buffer);
    }
    buffer
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
