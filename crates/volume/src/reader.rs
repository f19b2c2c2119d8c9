//! Read operations for MRC volumes
//!
//! The whole file is read into memory and decoded from the byte slice, so a
//! truncated file is reported as a format problem rather than an unexpected
//! end of stream.

// standard library
use std::fs;
use std::io::Read;
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::header::{Endian, Header, Mode, HEADER_LENGTH};
use crate::volume::{arrange, Volume, VolumeData, Voxel};

// tomokit modules
use tomokit_utils::f;

// external crates
use log::{debug, warn};

/// Read a tomogram from an MRC file
///
/// Returns a Result containing the [Volume] stored in the file at `path`,
/// indexed `[x, y, z]`. Both byte orders are supported and any extended header
/// is skipped.
///
/// ```rust, no_run
/// # use tomokit_volume::load_volume;
/// // Read the tutorial tomogram
/// let tomogram = load_volume("./Tomo0001.mrc").unwrap();
///
/// // Print a summary of the data
/// println!("{tomogram}");
/// ```
pub fn load_volume<P: AsRef<Path>>(path: P) -> Result<Volume> {
    let bytes = read_bytes(path.as_ref())?;
    let header = Header::from_bytes(&bytes)?;
    debug!("Read header for {}\n{header}", path.as_ref().display());
    decode_volume(&header, &bytes)
}

/// Read only the header of an MRC file
///
/// Useful for checking dimensions and voxel sizes without paying for the voxel
/// data.
pub fn read_header<P: AsRef<Path>>(path: P) -> Result<Header> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let mut buffer = Vec::with_capacity(HEADER_LENGTH);
    fs::File::open(path)?
        .take(HEADER_LENGTH as u64)
        .read_to_end(&mut buffer)?;
    Header::from_bytes(&buffer)
}

/// Read raw file content, distinguishing missing files from other failures
fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

/// Decode the voxel block following the header
pub(crate) fn decode_volume(header: &Header, bytes: &[u8]) -> Result<Volume> {
    let offset = header.data_offset();
    let expected = header.data_byte_length()?;
    let end = offset
        .checked_add(expected)
        .ok_or_else(|| Error::UnrecognisedHeader(f!("data block of {expected} bytes")))?;
    let available = bytes.len().saturating_sub(offset);

    if available < expected {
        return Err(Error::UnexpectedByteLength {
            expected,
            found: available,
        });
    } else if available > expected {
        warn!(
            "Ignoring {} trailing bytes after the voxel data",
            available - expected
        );
    }

    let block = &bytes[offset..end];
    let shape = header.dimensions.map(|n| n as usize);

    let data = match header.mode {
        Mode::Int8 => VolumeData::Int8(decode_block(block, shape, header.endian)?),
        Mode::Int16 => VolumeData::Int16(decode_block(block, shape, header.endian)?),
        Mode::Float32 => VolumeData::Float32(decode_block(block, shape, header.endian)?),
        Mode::Uint16 => VolumeData::Uint16(decode_block(block, shape, header.endian)?),
    };

    Ok(Volume {
        data,
        voxel_size: header.voxel_size(),
        origin: header.origin,
    })
}

/// Decode a block of bytes into an array of the requested element type
fn decode_block<T: Voxel>(
    block: &[u8],
    shape: [usize; 3],
    endian: Endian,
) -> Result<ndarray::Array3<T>> {
    let values = block
        .chunks_exact(T::MODE.byte_size())
        .map(|chunk| T::decode(chunk, endian))
        .collect::<Vec<T>>();
    arrange(values, shape)
}
