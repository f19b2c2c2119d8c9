use approx::assert_abs_diff_eq;
use ndarray::Array3;
use rstest::{fixture, rstest};
use tomokit_sample::*;
use tomokit_volume::Volume;

#[fixture]
fn constant() -> Volume {
    Volume::new(Array3::from_elem((6, 5, 4), 5.0_f32)).unwrap()
}

/// Linear in every axis, so any order reproduces it exactly inside the grid
#[fixture]
fn ramp() -> Volume {
    let array = Array3::from_shape_fn((8, 8, 8), |(x, y, z)| (x + 2 * y + 3 * z) as f32);
    Volume::new(array).unwrap()
}

fn ramp_value(p: [f64; 3]) -> f64 {
    p[0] + 2.0 * p[1] + 3.0 * p[2]
}

#[rstest]
fn constant_everywhere(
    constant: Volume,
    #[values(Order::Nearest, Order::Linear, Order::Cubic)] order: Order,
    #[values(Boundary::Nearest, Boundary::Mirror, Boundary::Reflect)] boundary: Boundary,
) {
    let points = [
        [0.0, 0.0, 0.0],
        [2.3, 1.7, 0.4],
        [5.0, 4.0, 3.0],
        [-7.5, 2.0, 1.0],
        [100.0, -100.0, 12.25],
    ];

    let sampler = Sampler::new(order, boundary);
    let values = sampler.sample(&constant, &points).unwrap();

    assert_eq!(values.len(), points.len());
    for value in values {
        assert_abs_diff_eq!(value, 5.0, epsilon = 1e-9);
    }
}

#[rstest]
fn default_sampling_of_constant(constant: Volume) {
    let values = sample_points(&constant, &[[1.0, 1.0, 1.0], [-20.0, 30.0, 0.5]]).unwrap();
    assert_abs_diff_eq!(values[0], 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(values[1], 5.0, epsilon = 1e-12);
}

#[rstest]
fn voxel_centres_are_exact(ramp: Volume) {
    let points = [[0.0, 0.0, 0.0], [3.0, 5.0, 7.0], [7.0, 7.0, 7.0]];
    for order in [Order::Nearest, Order::Linear] {
        let values = Sampler::new(order, Boundary::Nearest)
            .sample(&ramp, &points)
            .unwrap();
        assert_eq!(values, vec![0.0, 34.0, 42.0]);
    }
}

#[rstest]
fn trilinear(ramp: Volume) {
    let points = [[0.5, 0.5, 0.5], [2.25, 3.75, 1.5], [6.9, 0.1, 4.0]];
    let values = sample_points(&ramp, &points).unwrap();
    for (value, point) in values.iter().zip(points) {
        assert_abs_diff_eq!(*value, ramp_value(point), epsilon = 1e-9);
    }
}

#[rstest]
fn cubic_interpolates_voxel_centres(ramp: Volume) {
    let sampler = Sampler::builder().order(Order::Cubic).build();
    let points = [[0.0, 0.0, 0.0], [3.0, 4.0, 2.0], [7.0, 1.0, 6.0], [7.0, 7.0, 7.0]];
    let values = sampler.sample(&ramp, &points).unwrap();
    for (value, point) in values.iter().zip(points) {
        assert_abs_diff_eq!(*value, ramp_value(point), epsilon = 1e-9);
    }
}

#[rstest]
fn cubic_between_voxels(ramp: Volume) {
    // close to the ramp away from the edges, bounded by the neighbours
    let sampler = Sampler::builder().order(Order::Cubic).build();
    let value = sampler.sample(&ramp, &[[3.5, 3.5, 3.5]]).unwrap()[0];
    assert_abs_diff_eq!(value, ramp_value([3.5, 3.5, 3.5]), epsilon = 0.1);
    assert!(value > ramp_value([3.0, 3.0, 3.0]) && value < ramp_value([4.0, 4.0, 4.0]));
}

#[rstest]
fn nearest_order_rounds(ramp: Volume) {
    let sampler = Sampler::builder().order(Order::Nearest).build();
    let values = sampler.sample(&ramp, &[[1.4, 1.6, 0.5]]).unwrap();
    assert_eq!(values, vec![ramp_value([1.0, 2.0, 1.0])]);
}

#[rstest]
fn constant_boundary(ramp: Volume) {
    let sampler = Sampler::builder().boundary(Boundary::Constant(-1.0)).build();
    let points = [[-0.5, 2.0, 2.0], [1.0, 1.0, 1.0], [1.0, 7.5, 1.0]];
    let values = sampler.sample(&ramp, &points).unwrap();
    assert_eq!(values, vec![-1.0, 6.0, -1.0]);
}

#[rstest]
fn nearest_boundary_clamps(ramp: Volume) {
    let values = sample_points(&ramp, &[[-3.0, 0.0, 0.0], [10.0, 7.0, 7.0]]).unwrap();
    assert_eq!(values, vec![0.0, 42.0]);
}

#[rstest]
fn integer_volume() {
    let array = Array3::from_shape_fn((3, 3, 3), |(x, _, _)| (x as i16) * 10 - 10);
    let volume = Volume::new(array).unwrap();
    let values = sample_points(&volume, &[[0.5, 1.0, 1.0], [1.5, 0.0, 2.0]]).unwrap();
    assert_eq!(values, vec![-5.0, 5.0]);
}

#[rstest]
fn empty_points(constant: Volume) {
    assert!(sample_points(&constant, &[]).unwrap().is_empty());
}

#[rstest]
#[case([f64::NAN, 0.0, 0.0])]
#[case([0.0, f64::INFINITY, 0.0])]
#[case([0.0, 0.0, f64::NEG_INFINITY])]
fn non_finite_coordinates(constant: Volume, #[case] bad: [f64; 3]) {
    let points = [[1.0, 1.0, 1.0], bad];
    let result = sample_points(&constant, &points);
    assert!(matches!(
        result,
        Err(Error::NonFiniteCoordinate { index: 1, .. })
    ));
}

#[rstest]
fn rescale() {
    let points = vec![[14.08, 28.16, 0.0]];
    assert_eq!(rescale_points(&points, 14.08).unwrap(), vec![[1.0, 2.0, 0.0]]);
    assert_eq!(rescale_points(&points, 1.0).unwrap(), points);
    assert!(rescale_points(&[], 2.0).unwrap().is_empty());
}

#[rstest]
#[case(0.0)]
#[case(-14.08)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn invalid_scale_factor(#[case] k: f64) {
    let result = rescale_points(&[[1.0, 2.0, 3.0]], k);
    assert!(matches!(result, Err(Error::InvalidScaleFactor(_))));
}

#[rstest]
fn prepared_matches_direct(
    ramp: Volume,
    #[values(Order::Nearest, Order::Linear, Order::Cubic)] order: Order,
) {
    let sampler = Sampler::new(order, Boundary::Mirror);
    let prepared = sampler.prepare(&ramp);
    assert_eq!(prepared.is_prefiltered(), order == Order::Cubic);
    assert_eq!(prepared.sampler(), sampler);

    let points = [[1.25, 3.5, 6.75], [0.0, 7.0, 2.0], [-1.5, 9.0, 3.3]];
    let direct = sampler.sample(&ramp, &points).unwrap();
    let batches = [&points[..1], &points[1..]].map(|batch| prepared.sample(batch).unwrap());

    assert_eq!(batches.concat(), direct);
}

#[rstest]
fn prepared_volume_shared_between_threads(ramp: Volume) {
    let prepared = Sampler::new(Order::Cubic, Boundary::Nearest).prepare(&ramp);
    let expected = prepared.sample(&[[3.0, 4.0, 5.0]]).unwrap();

    std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| scope.spawn(|| prepared.sample(&[[3.0, 4.0, 5.0]]).unwrap()))
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
    assert_abs_diff_eq!(expected[0], ramp_value([3.0, 4.0, 5.0]), epsilon = 1e-9);
}

#[rstest]
fn prepared_rejects_non_finite(ramp: Volume) {
    let prepared = Sampler::default().prepare(&ramp);
    assert!(matches!(
        prepared.sample(&[[0.0, 0.0, 0.0], [f64::NAN, 1.0, 1.0]]),
        Err(Error::NonFiniteCoordinate { index: 1, .. })
    ));
}
