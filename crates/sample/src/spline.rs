//! Conversion of voxel values into cubic B-spline coefficients

// external crates
use ndarray::{Array3, ArrayViewMut1, Axis};

/// Pole of the cubic B-spline recursive filter
const POLE: f64 = -0.267_949_192_431_122_7;

/// Cubic B-spline coefficients for every voxel
///
/// The direct transform is separable, so a 1D recursive filter is applied to
/// every lane of each axis in turn. Axes of length 1 are left unchanged.
/// Boundaries are mirrored.
pub(crate) fn prefilter(values: Array3<f64>) -> Array3<f64> {
    let mut coefficients = values;
    for axis in 0..3 {
        if coefficients.len_of(Axis(axis)) < 2 {
            continue;
        }
        for lane in coefficients.lanes_mut(Axis(axis)) {
            filter_lane(lane);
        }
    }
    coefficients
}

fn filter_lane(mut c: ArrayViewMut1<f64>) {
    let n = c.len();
    let z = POLE;
    let gain = (1.0 - z) * (1.0 - 1.0 / z);

    c.mapv_inplace(|v| v * gain);

    // causal
    let initial = causal_initial(&c, z);
    c[0] = initial;
    for i in 1..n {
        let previous = c[i - 1];
        c[i] += z * previous;
    }

    // anti-causal
    let last = (z * c[n - 2] + c[n - 1]) * z / (z * z - 1.0);
    c[n - 1] = last;
    for i in (0..n - 1).rev() {
        let next = c[i + 1];
        c[i] = z * (next - c[i]);
    }
}

/// Initial causal coefficient for a mirror-symmetric extension
fn causal_initial(c: &ArrayViewMut1<f64>, z: f64) -> f64 {
    let n = c.len();
    let z_n1 = z.powi(n as i32 - 1);

    let mut z_i = z;
    let mut sum = c[0] + z_n1 * c[n - 1];
    for i in 1..n - 1 {
        sum += z_i * (c[i] + z_n1 * c[n - 1 - i]);
        z_i *= z;
    }

    sum / (1.0 - z_n1 * z_n1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pole() {
        assert!((POLE - (3.0_f64.sqrt() - 2.0)).abs() < 1e-15);
    }

    #[test]
    fn constant_is_unchanged() {
        let values = Array3::from_elem((5, 4, 3), 2.5);
        let coefficients = prefilter(values);
        assert!(coefficients.iter().all(|c| (c - 2.5).abs() < 1e-12));
    }

    #[test]
    fn interpolates_samples() {
        // coefficients convolved with [1, 4, 1]/6 reproduce the data
        let data = [1.0, 4.0, -2.0, 0.5, 3.0, 3.0, 7.0];
        let values = Array3::from_shape_vec((data.len(), 1, 1), data.to_vec()).unwrap();
        let c = prefilter(values);

        let n = data.len();
        let mirror = |i: i64| -> usize {
            let period = 2 * n as i64 - 2;
            let i = i.rem_euclid(period);
            (if i >= n as i64 { period - i } else { i }) as usize
        };

        for (i, expected) in data.iter().enumerate() {
            let i = i as i64;
            let value = (c[[mirror(i - 1), 0, 0]]
                + 4.0 * c[[mirror(i), 0, 0]]
                + c[[mirror(i + 1), 0, 0]])
                / 6.0;
            assert!((value - expected).abs() < 1e-9, "{value} != {expected}");
        }
    }
}
