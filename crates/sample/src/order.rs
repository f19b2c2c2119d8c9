//! Interpolation order and the spline weights of each

// crate modules
use crate::error::{Error, Result};

/// Order of the spline used to interpolate between voxel centres
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Order 0, value of the closest voxel
    Nearest,
    /// Order 1, trilinear interpolation of the 8 surrounding voxels
    #[default]
    Linear,
    /// Order 3, cubic B-spline over the 64 surrounding voxels
    Cubic,
}

impl Order {
    /// Spline order as a number
    pub fn number(&self) -> u8 {
        match self {
            Self::Nearest => 0,
            Self::Linear => 1,
            Self::Cubic => 3,
        }
    }

    /// True if voxel values must be converted to spline coefficients first
    pub(crate) fn needs_prefilter(&self) -> bool {
        matches!(self, Self::Cubic)
    }

    /// Voxel indices and weights contributing to a coordinate along one axis
    pub(crate) fn taps(&self, coordinate: f64) -> Taps {
        match self {
            Self::Nearest => Taps {
                start: (coordinate + 0.5).floor() as i64,
                weights: [1.0, 0.0, 0.0, 0.0],
                len: 1,
            },
            Self::Linear => {
                let start = coordinate.floor();
                let t = coordinate - start;
                Taps {
                    start: start as i64,
                    weights: [1.0 - t, t, 0.0, 0.0],
                    len: 2,
                }
            }
            Self::Cubic => {
                let base = coordinate.floor();
                let t = coordinate - base;
                let (t2, t3) = (t * t, t * t * t);
                Taps {
                    start: base as i64 - 1,
                    weights: [
                        (1.0 - t).powi(3) / 6.0,
                        (4.0 - 6.0 * t2 + 3.0 * t3) / 6.0,
                        (1.0 + 3.0 * t + 3.0 * t2 - 3.0 * t3) / 6.0,
                        t3 / 6.0,
                    ],
                    len: 4,
                }
            }
        }
    }
}

impl TryFrom<u8> for Order {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Nearest),
            1 => Ok(Self::Linear),
            3 => Ok(Self::Cubic),
            _ => Err(Error::UnsupportedOrder(value)),
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::Nearest => "Nearest (order 0)",
            Self::Linear => "Linear (order 1)",
            Self::Cubic => "Cubic (order 3)",
        };
        write!(f, "{}", s)
    }
}

/// Contributions along a single axis
#[derive(Debug, Clone, Copy)]
pub(crate) struct Taps {
    /// Index of the first contributing voxel, may be out of range
    pub start: i64,
    /// Weight of each voxel from `start`, only the first `len` are used
    pub weights: [f64; 4],
    pub len: usize,
}

impl Taps {
    /// Iterator over (index, weight) pairs
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + Clone + '_ {
        self.weights[..self.len]
            .iter()
            .enumerate()
            .map(|(i, &w)| (self.start + i as i64, w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_number() {
        assert_eq!(Order::try_from(0), Ok(Order::Nearest));
        assert_eq!(Order::try_from(1), Ok(Order::Linear));
        assert_eq!(Order::try_from(3), Ok(Order::Cubic));
        assert_eq!(Order::try_from(2), Err(Error::UnsupportedOrder(2)));
    }

    #[test]
    fn nearest_rounds_half_up() {
        assert_eq!(Order::Nearest.taps(1.49).start, 1);
        assert_eq!(Order::Nearest.taps(1.5).start, 2);
        assert_eq!(Order::Nearest.taps(-0.6).start, -1);
    }

    #[test]
    fn weights_sum_to_one() {
        for order in [Order::Nearest, Order::Linear, Order::Cubic] {
            for coordinate in [0.0, 0.25, 3.5, 7.9, -1.3] {
                let total: f64 = order.taps(coordinate).iter().map(|(_, w)| w).sum();
                assert!((total - 1.0).abs() < 1e-12, "{order} at {coordinate}");
            }
        }
    }

    #[test]
    fn cubic_on_grid() {
        let taps = Order::Cubic.taps(2.0);
        assert_eq!(taps.start, 1);
        assert!((taps.weights[0] - 1.0 / 6.0).abs() < 1e-12);
        assert!((taps.weights[1] - 4.0 / 6.0).abs() < 1e-12);
        assert!((taps.weights[2] - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(taps.weights[3], 0.0);
    }
}
