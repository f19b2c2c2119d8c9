//! Treatment of taps that fall outside of the volume

// standard library
use std::str::FromStr;

// crate modules
use crate::error::{Error, Result};

// tomokit modules
use tomokit_utils::f;

/// How to treat interpolation taps that land outside of the volume
///
/// Coordinates beyond the grid are folded back onto it along each axis
/// independently, so a point just past the last voxel still gets a sensible
/// value.
///
/// For an axis of length 4 holding `a b c d`:
///
/// | Boundary      | Extension to the right |
/// | ------------- | ---------------------- |
/// | `Nearest`     | `a b c d | d d d`       |
/// | `Mirror`      | `a b c d | c b a`       |
/// | `Reflect`     | `a b c d | d c b`       |
/// | `Constant(v)` | `a b c d | v v v`       |
///
/// The default `Nearest` extension means a volume of constant value samples
/// to that constant everywhere, including well outside the grid.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// Repeat the edge voxel
    #[default]
    Nearest,
    /// Reflect about the centre of the edge voxel
    Mirror,
    /// Reflect about the outer edge of the edge voxel
    Reflect,
    /// Points outside of `[0, n-1]` on any axis take the given value
    Constant(f64),
}

impl Boundary {
    /// Fold a coordinate along one axis back onto `[0, n-1]`
    ///
    /// Coordinates already on the grid are returned unchanged, as are all
    /// coordinates under [Boundary::Constant], which is handled separately by
    /// [Boundary::outside_value].
    pub(crate) fn fold(&self, coordinate: f64, length: usize) -> f64 {
        let upper = (length - 1) as f64;
        if (0.0..=upper).contains(&coordinate) || (length == 1 && !self.is_constant()) {
            return coordinate.clamp(0.0, upper);
        }

        match self {
            Self::Nearest => coordinate.clamp(0.0, upper),
            Self::Mirror => {
                let period = 2.0 * upper;
                let c = coordinate.rem_euclid(period);
                if c > upper {
                    period - c
                } else {
                    c
                }
            }
            Self::Reflect => {
                let period = 2.0 * length as f64;
                let c = (coordinate + 0.5).rem_euclid(period);
                let c = if c >= length as f64 { period - c } else { c };
                (c - 0.5).clamp(0.0, upper)
            }
            Self::Constant(_) => coordinate,
        }
    }

    /// Replacement value for points outside of the volume, if any
    pub(crate) fn outside_value(&self, point: &[f64; 3], shape: [usize; 3]) -> Option<f64> {
        match self {
            Self::Constant(cval) => {
                let outside = point
                    .iter()
                    .zip(shape)
                    .any(|(&c, n)| c < 0.0 || c > (n - 1) as f64);
                outside.then_some(*cval)
            }
            _ => None,
        }
    }

    fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }
}

/// Map a tap index onto the grid by mirroring about the edge voxels
///
/// Spline support near an edge extends past the grid, and the spline
/// coefficients are computed on a mirrored extension, so the taps must be
/// mirrored the same way.
pub(crate) fn mirror_index(index: i64, length: usize) -> usize {
    let n = length as i64;
    if (0..n).contains(&index) {
        return index as usize;
    }
    if n == 1 {
        return 0;
    }

    let period = 2 * n - 2;
    let i = index.rem_euclid(period);
    (if i >= n { period - i } else { i }) as usize
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match *self {
            Self::Nearest => "Nearest".to_string(),
            Self::Mirror => "Mirror".to_string(),
            Self::Reflect => "Reflect".to_string(),
            Self::Constant(cval) => f!("Constant (value={cval})"),
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Boundary {
    type Err = Error;

    /// Accepts `nearest`, `mirror`, `reflect`, `constant`, or `constant=<value>`
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim().to_lowercase();
        let (name, value) = match text.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (text.as_str(), None),
        };

        match (name, value) {
            ("nearest", None) => Ok(Self::Nearest),
            ("mirror", None) => Ok(Self::Mirror),
            ("reflect", None) => Ok(Self::Reflect),
            ("constant", None) => Ok(Self::Constant(0.0)),
            ("constant", Some(v)) => v
                .parse::<f64>()
                .map(Self::Constant)
                .map_err(|_| Error::InvalidBoundary(s.to_string())),
            _ => Err(Error::InvalidBoundary(s.to_string())),
        }
    }
}
