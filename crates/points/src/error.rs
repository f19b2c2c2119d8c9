//! Result and Error types for tomokit-points

// standard library
use std::path::PathBuf;

/// Type alias for Result<T, points::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `tomokit-points` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("failed to decode mesh data")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "hdf5")]
    #[error("failed to access HDF5 mesh data")]
    Hdf5(#[from] hdf5::Error),

    #[error("HDF5 support not enabled, rebuild with the \"hdf5\" feature to read {0:?}")]
    Hdf5Unsupported(PathBuf),

    #[error("mesh entry \"{key}\" has unexpected shape {shape:?}")]
    InvalidShape { key: String, shape: Vec<usize> },

    #[error("mesh data has no \"{0}\" entry")]
    MissingKey(String),

    #[error("inconsistent length of \"{key}\" (expected {expected}, found {found})")]
    InconsistentLength {
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("no table with column \"{0}\" found")]
    MissingColumn(String),

    #[error("row on line {line} has {found} values (expected {expected})")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("parser failed on line {line}: {reason}")]
    ParseError { line: usize, reason: String },
}
