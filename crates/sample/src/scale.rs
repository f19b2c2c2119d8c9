//! Uniform rescaling of point coordinates

// crate modules
use crate::error::{Error, Result};

/// Uniform divisor applied to every axis of a point set
///
/// Mesh coordinates and tomogram voxels do not always share the same spacing.
/// For example, points generated in angstroms need dividing by the voxel size
/// (e.g. 14.08) to land on voxel indices.
///
/// Always positive and finite. The default of 1.0 leaves points unchanged.
///
/// ```rust
/// # use tomokit_sample::ScaleFactor;
/// assert!(ScaleFactor::new(14.08).is_ok());
/// assert!(ScaleFactor::new(0.0).is_err());
/// assert!(ScaleFactor::new(-1.0).is_err());
/// assert!(ScaleFactor::default().is_identity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// Checked constructor
    pub fn new(value: f64) -> Result<Self> {
        if value > 0.0 && value.is_finite() {
            Ok(Self(value))
        } else {
            Err(Error::InvalidScaleFactor(value))
        }
    }

    /// The divisor
    pub fn value(&self) -> f64 {
        self.0
    }

    /// True if applying the factor changes nothing
    pub fn is_identity(&self) -> bool {
        self.0 == 1.0
    }

    /// Divide every coordinate by the factor
    pub fn apply(&self, points: &[[f64; 3]]) -> Vec<[f64; 3]> {
        points.iter().map(|p| p.map(|c| c / self.0)).collect()
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(1.0)
    }
}

impl TryFrom<f64> for ScaleFactor {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl std::fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Divide every coordinate by `scale_factor`
///
/// Pure function, the input is left untouched. Fails for scale factors that
/// are zero, negative, or not finite.
///
/// ```rust
/// # use tomokit_sample::rescale_points;
/// let points = vec![[14.08, 28.16, 0.0]];
/// assert_eq!(rescale_points(&points, 14.08).unwrap(), vec![[1.0, 2.0, 0.0]]);
/// assert!(rescale_points(&points, 0.0).is_err());
/// ```
pub fn rescale_points(points: &[[f64; 3]], scale_factor: f64) -> Result<Vec<[f64; 3]>> {
    Ok(ScaleFactor::new(scale_factor)?.apply(points))
}
