// crate modules
use crate::boundary::{mirror_index, Boundary};
use crate::error::{Error, Result};
use crate::order::{Order, Taps};
use crate::spline::prefilter;

// tomokit modules
use tomokit_volume::{Volume, VolumeData};

// external crates
use itertools::iproduct;
use log::{debug, trace};
use ndarray::{Array3, ArrayView3};

/// Interpolates volume values at arbitrary continuous coordinates
///
/// Coordinates are in voxel index space, so `[1.0, 2.0, 0.0]` is exactly the
/// centre of voxel `[1, 2, 0]`. A sampled value is always `f64` regardless of
/// the storage type of the volume.
///
/// ```rust
/// # use tomokit_sample::{Boundary, Order, Sampler};
/// # use tomokit_volume::Volume;
/// # use ndarray::Array3;
/// let volume = Volume::new(Array3::from_elem((4, 4, 4), 5.0_f32)).unwrap();
///
/// let sampler = Sampler::builder()
///     .order(Order::Cubic)
///     .boundary(Boundary::Nearest)
///     .build();
///
/// let values = sampler.sample(&volume, &[[1.5, 1.5, 1.5], [-3.0, 9.0, 2.0]]).unwrap();
/// assert!(values.iter().all(|v| (v - 5.0).abs() < 1e-9));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Sampler {
    /// Spline order
    pub order: Order,
    /// Extension of the volume beyond its edges
    pub boundary: Boundary,
}

impl Sampler {
    /// Start a [SamplerBuilder] with default parameters
    pub fn builder() -> SamplerBuilder {
        SamplerBuilder::default()
    }

    /// Sampler with the given order and boundary treatment
    pub fn new(order: Order, boundary: Boundary) -> Self {
        Self { order, boundary }
    }

    /// Interpolated values at every point, in order
    ///
    /// Fails with [Error::NonFiniteCoordinate] before any interpolation is
    /// done if a coordinate is NaN or infinite. An empty point set gives an
    /// empty result.
    ///
    /// Cubic interpolation computes spline coefficients for the whole volume
    /// on every call. Use [Sampler::prepare] to sample many point sets from
    /// the same volume.
    pub fn sample(&self, volume: &Volume, points: &[[f64; 3]]) -> Result<Vec<f64>> {
        check_finite(points)?;
        if points.is_empty() {
            return Ok(Vec::new());
        }
        self.prepare(volume).sample(points)
    }

    /// Bind the sampler to a volume, computing spline coefficients if needed
    ///
    /// The result can be shared between threads and sampled any number of
    /// times. Orders 0 and 1 borrow the voxels directly.
    ///
    /// ```rust
    /// # use tomokit_sample::{Order, Sampler};
    /// # use tomokit_volume::Volume;
    /// # use ndarray::Array3;
    /// let volume = Volume::new(Array3::from_elem((8, 8, 8), 2.0_f32)).unwrap();
    /// let prepared = Sampler::new(Order::Cubic, Default::default()).prepare(&volume);
    ///
    /// let first = prepared.sample(&[[1.0, 2.0, 3.0]]).unwrap();
    /// let second = prepared.sample(&[[4.5, 4.5, 4.5]]).unwrap();
    /// assert!((first[0] - second[0]).abs() < 1e-9);
    /// ```
    pub fn prepare<'a>(&self, volume: &'a Volume) -> PreparedVolume<'a> {
        let source = if self.order.needs_prefilter() {
            debug!("Computing spline coefficients for {:?} voxels", volume.shape());
            Source::Coefficients(prefilter(volume.data.to_f64()))
        } else {
            Source::Voxels(&volume.data)
        };

        PreparedVolume {
            sampler: *self,
            source,
        }
    }

    fn sample_array<T>(&self, array: ArrayView3<T>, points: &[[f64; 3]]) -> Vec<f64>
    where
        T: Copy + Into<f64>,
    {
        points
            .iter()
            .map(|point| self.sample_point(&array, point))
            .collect()
    }

    fn sample_point<T>(&self, array: &ArrayView3<T>, point: &[f64; 3]) -> f64
    where
        T: Copy + Into<f64>,
    {
        let (nx, ny, nz) = array.dim();

        if let Some(value) = self.boundary.outside_value(point, [nx, ny, nz]) {
            return value;
        }

        let folded = [
            self.boundary.fold(point[0], nx),
            self.boundary.fold(point[1], ny),
            self.boundary.fold(point[2], nz),
        ];
        let [tx, ty, tz]: [Taps; 3] = folded.map(|c| self.order.taps(c));

        iproduct!(tx.iter(), ty.iter(), tz.iter())
            .map(|((ix, wx), (iy, wy), (iz, wz))| {
                let index = [
                    mirror_index(ix, nx),
                    mirror_index(iy, ny),
                    mirror_index(iz, nz),
                ];
                let value: f64 = array[index].into();
                wx * wy * wz * value
            })
            .sum()
    }
}

/// Values interpolated by a [PreparedVolume]
#[derive(Debug)]
enum Source<'a> {
    /// Voxels sampled as stored
    Voxels(&'a VolumeData),
    /// Cubic B-spline coefficients of the whole volume
    Coefficients(Array3<f64>),
}

/// A [Sampler] bound to one volume
///
/// Created by [Sampler::prepare]. Any prefiltering is already done, so
/// repeated calls to [PreparedVolume::sample] only pay for the points.
#[derive(Debug)]
pub struct PreparedVolume<'a> {
    sampler: Sampler,
    source: Source<'a>,
}

impl PreparedVolume<'_> {
    /// Sampler configuration in use
    pub fn sampler(&self) -> Sampler {
        self.sampler
    }

    /// True if spline coefficients were computed for the volume
    pub fn is_prefiltered(&self) -> bool {
        matches!(self.source, Source::Coefficients(_))
    }

    /// Interpolated values at every point, in order
    ///
    /// Same checks and results as [Sampler::sample].
    pub fn sample(&self, points: &[[f64; 3]]) -> Result<Vec<f64>> {
        check_finite(points)?;

        trace!(
            "Sampling {} points, order={}, boundary={}",
            points.len(),
            self.sampler.order,
            self.sampler.boundary
        );

        let sampler = &self.sampler;
        let values = match &self.source {
            Source::Coefficients(array) => sampler.sample_array(array.view(), points),
            Source::Voxels(VolumeData::Int8(array)) => sampler.sample_array(array.view(), points),
            Source::Voxels(VolumeData::Int16(array)) => sampler.sample_array(array.view(), points),
            Source::Voxels(VolumeData::Float32(array)) => {
                sampler.sample_array(array.view(), points)
            }
            Source::Voxels(VolumeData::Uint16(array)) => {
                sampler.sample_array(array.view(), points)
            }
        };

        Ok(values)
    }
}

/// Builder implementation for [Sampler] configuration
///
/// Any number of parameters can be set this way, including none.
///
/// ```rust
/// # use tomokit_sample::{Boundary, Order, Sampler};
/// let sampler = Sampler::builder()
///     .order(Order::Nearest)
///     .boundary(Boundary::Constant(0.0))
///     .build();
///
/// assert_eq!(sampler.order, Order::Nearest);
/// ```
#[derive(Debug, Default)]
pub struct SamplerBuilder {
    order: Order,
    boundary: Boundary,
}

impl SamplerBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [Sampler] type
    pub fn build(self) -> Sampler {
        Sampler {
            order: self.order,
            boundary: self.boundary,
        }
    }

    /// Spline order, defaults to [Order::Linear]
    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Boundary treatment, defaults to [Boundary::Nearest]
    ///
    /// Use [Boundary::Constant] to flag points that fall outside of the
    /// tomogram with an obvious value.
    pub fn boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }
}

/// Interpolated tomogram value at every point using default settings
///
/// Trilinear interpolation, with edge voxels repeated beyond the volume. See
/// [Sampler] for other orders and boundary treatments.
///
/// ```rust
/// # use tomokit_sample::sample_points;
/// # use tomokit_volume::Volume;
/// # use ndarray::Array3;
/// let volume = Volume::new(Array3::from_shape_fn((2, 2, 2), |(x, _, _)| x as f32)).unwrap();
/// let values = sample_points(&volume, &[[0.5, 0.0, 0.0], [0.0, 1.0, 1.0]]).unwrap();
/// assert_eq!(values, vec![0.5, 0.0]);
/// ```
pub fn sample_points(volume: &Volume, points: &[[f64; 3]]) -> Result<Vec<f64>> {
    Sampler::default().sample(volume, points)
}

fn check_finite(points: &[[f64; 3]]) -> Result<()> {
    match points
        .iter()
        .position(|p| p.iter().any(|c| !c.is_finite()))
    {
        Some(index) => Err(Error::NonFiniteCoordinate {
            index,
            point: points[index],
        }),
        None => Ok(()),
    }
}
