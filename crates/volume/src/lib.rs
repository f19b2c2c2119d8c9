//! Module for reading, cropping, and writing MRC tomograms
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod header;
mod reader;
mod volume;
mod writer;

// Inline anything important for a nice public API
#[doc(inline)]
pub use volume::{Extents, Volume, VolumeData, Voxel};

#[doc(inline)]
pub use header::{Endian, Header, Mode, HEADER_LENGTH};

#[doc(inline)]
pub use reader::{load_volume, read_header};

#[doc(inline)]
pub use writer::{crop_file, save_volume};

#[doc(inline)]
pub use error::{Error, Result};

/// Crop a rectangular sub-volume
///
/// Free function form of [Volume::crop()]. The input volume is not modified,
/// and the result is an independent copy.
///
/// ```rust
/// # use tomokit_volume::{crop_volume, Extents, Volume};
/// # use ndarray::Array3;
/// let volume = Volume::new(Array3::<i16>::zeros((50, 60, 70))).unwrap();
///
/// // start == end is never a valid extent
/// assert!(crop_volume(&volume, &Extents::new((0, 0), (0, 60), (0, 70))).is_err());
///
/// // full extents are a plain copy
/// let copy = crop_volume(&volume, &Extents::full(volume.shape())).unwrap();
/// assert_eq!(copy, volume);
/// ```
pub fn crop_volume(volume: &Volume, extents: &Extents) -> Result<Volume> {
    volume.crop(extents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::decode_volume;
    use crate::writer::header_for;
    use ndarray::Array3;

    #[test]
    fn truncated_data_block() {
        let volume = Volume::new(Array3::<f32>::ones((4, 4, 4))).unwrap();
        let header = header_for(&volume);

        let mut bytes = header.to_bytes().to_vec();
        bytes.extend(std::iter::repeat(0u8).take(10));

        assert!(matches!(
            decode_volume(&header, &bytes),
            Err(Error::UnexpectedByteLength {
                expected: 256,
                found: 10
            })
        ));
    }

    #[test]
    fn header_statistics() {
        let array = Array3::from_shape_fn((2, 2, 2), |(x, y, z)| (x + 2 * y + 4 * z) as i16);
        let header = header_for(&Volume::new(array).unwrap().with_voxel_size([14.08; 3]));

        assert_eq!(header.dmin, 0.0);
        assert_eq!(header.dmax, 7.0);
        assert_eq!(header.dmean, 3.5);
        assert_eq!(header.mode, Mode::Int16);
        assert_eq!(header.dimensions, [2, 2, 2]);
        assert_eq!(header.cell_lengths, [28.16; 3]);
    }
}
