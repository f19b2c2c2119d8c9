//! Result and Error types for tomokit-pick

// standard library
use std::path::PathBuf;

/// Type alias for Result<T, pick::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `tomokit-pick` crate
///
/// Failures of the volume, sampling, and point readers are forwarded
/// untouched.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    Volume(#[from] tomokit_volume::Error),

    #[error(transparent)]
    Sample(#[from] tomokit_sample::Error),

    #[error(transparent)]
    Points(#[from] tomokit_points::Error),

    #[error("failed to (de)serialise json")]
    Json(#[from] serde_json::Error),

    #[error("vtkio error")]
    VtkioError(#[from] vtkio::Error),

    #[error("failed request")]
    FailedRequest(#[from] minreq::Error),

    #[error("request to {url} failed with status {code}")]
    BadResponse { url: String, code: i32 },

    #[error("\"{identifier}\" is not a known membrane (expected one of {allowed:?})")]
    UnknownIdentifier {
        identifier: String,
        allowed: Vec<String>,
    },

    #[error("dataset file not found: {0:?}")]
    MissingDatasetFile(PathBuf),

    #[error("failed to extract {archive:?}: {reason}")]
    ExtractionFailed { archive: PathBuf, reason: String },
}
