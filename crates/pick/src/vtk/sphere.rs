use std::f64::consts::PI;

/// Points on the surface of a sphere
///
/// The surface is a `resolution` x `resolution` grid over the polar angle
/// (0 to pi) and the azimuthal angle (0 to 2pi), both end points included.
/// Points are ordered azimuth-major, so point `[i * resolution + j]` has the
/// i-th azimuthal and j-th polar angle.
///
/// ```rust
/// # use tomokit_pick::vtk::sphere_surface;
/// let points = sphere_surface([1.0, 2.0, 3.0], 4.0, 10);
/// assert_eq!(points.len(), 100);
///
/// // first polar angle is always the top of the sphere
/// assert_eq!(points[0], [1.0, 2.0, 7.0]);
/// ```
pub fn sphere_surface(center: [f64; 3], radius: f64, resolution: usize) -> Vec<[f64; 3]> {
    let phi = linspace(0.0, PI, resolution);
    let theta = linspace(0.0, 2.0 * PI, resolution);

    let mut points = Vec::with_capacity(resolution * resolution);
    for t in &theta {
        for p in &phi {
            points.push([
                center[0] + radius * p.sin() * t.cos(),
                center[1] + radius * p.sin() * t.sin(),
                center[2] + radius * p.cos(),
            ]);
        }
    }
    points
}

/// `n` evenly spaced values from `start` to `end` inclusive
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn on_surface() {
        let center = [10.0, -4.0, 2.5];
        for p in sphere_surface(center, 3.0, 12) {
            let r = ((p[0] - center[0]).powi(2)
                + (p[1] - center[1]).powi(2)
                + (p[2] - center[2]).powi(2))
            .sqrt();
            assert!((r - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn poles() {
        let points = sphere_surface([0.0; 3], 2.0, 5);
        // last polar angle of every azimuth is the bottom
        for i in 0..5 {
            assert!((points[i * 5 + 4][2] + 2.0).abs() < 1e-12);
            assert_eq!(points[i * 5][2], 2.0);
        }
    }
}
