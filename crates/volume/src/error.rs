//! Result and Error types for the volume module

use std::path::PathBuf;

/// Type alias for `Result<T, volume::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `tomokit-volume`
pub enum Error {
    /// Input path does not exist
    #[error("file not found \"{0}\"")]
    NotFound(PathBuf),

    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Data mode in the header is not one of the supported element types
    #[error("unsupported MRC data mode {0}")]
    UnsupportedMode(i32),

    /// Header does not describe a usable volume
    #[error("unrecognised MRC header ({0})")]
    UnrecognisedHeader(String),

    /// Dimensions must all be positive
    #[error("invalid volume dimensions {0:?}")]
    InvalidDimensions([i64; 3]),

    /// Unexpected length of bytes based on file content
    #[error("unexpected byte length (expected {expected:?}, found {found:?})")]
    UnexpectedByteLength { expected: usize, found: usize },

    /// Cropping extent lies outside of the volume
    #[error("extent {start}..{end} out of range for axis {axis} with length {length}")]
    ExtentOutOfRange {
        axis: usize,
        start: i64,
        end: i64,
        length: usize,
    },

    /// Failed to interpret a text description of extents
    #[error("failed to parse extents from \"{0}\"")]
    InvalidExtents(String),

    /// Voxel data could not be arranged into the expected shape
    #[error("failed to shape voxel data")]
    ShapeError(#[from] ndarray::ShapeError),
}
