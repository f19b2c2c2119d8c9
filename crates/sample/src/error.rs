//! Result and Error types for the sample module

/// Type alias for `Result<T, sample::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, PartialEq)]
/// The error type for `tomokit-sample`
pub enum Error {
    /// Scale factors must be positive and finite
    #[error("invalid scale factor {0} (must be positive and finite)")]
    InvalidScaleFactor(f64),

    /// Coordinates must be finite to be sampled
    #[error("point {index} has a non-finite coordinate {point:?}")]
    NonFiniteCoordinate { index: usize, point: [f64; 3] },

    /// Only spline orders 0, 1, and 3 are implemented
    #[error("unsupported interpolation order {0} (expected 0, 1, or 3)")]
    UnsupportedOrder(u8),

    /// Failed to interpret a boundary mode from text
    #[error("failed to infer boundary mode from \"{0}\"")]
    InvalidBoundary(String),
}
