// standard library
use std::ops::Range;
use std::str::FromStr;

// crate modules
use crate::error::{Error, Result};
use crate::header::{Endian, Mode};

// tomokit modules
use tomokit_utils::{f, CoordinateExt};

// external crates
use itertools::Itertools;
use ndarray::{Array3, ArrayView3, Slice};

/// Element types that may be stored in a [Volume]
///
/// Every supported MRC mode maps to one primitive. All of them convert
/// losslessly into `f64` for sampling and statistics.
pub trait Voxel: Copy + Into<f64> + std::fmt::Debug + PartialEq + 'static {
    /// MRC mode written for this element type
    const MODE: Mode;

    /// Decode a single value from exactly `MODE.byte_size()` bytes
    fn decode(bytes: &[u8], endian: Endian) -> Self;

    /// Append the little endian bytes of the value
    fn encode(&self, buffer: &mut Vec<u8>);
}

impl Voxel for i8 {
    const MODE: Mode = Mode::Int8;

    fn decode(bytes: &[u8], _: Endian) -> Self {
        i8::from_ne_bytes([bytes[0]])
    }

    fn encode(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.to_le_bytes());
    }
}

impl Voxel for i16 {
    const MODE: Mode = Mode::Int16;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        let word = [bytes[0], bytes[1]];
        match endian {
            Endian::Little => i16::from_le_bytes(word),
            Endian::Big => i16::from_be_bytes(word),
        }
    }

    fn encode(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.to_le_bytes());
    }
}

impl Voxel for u16 {
    const MODE: Mode = Mode::Uint16;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        let word = [bytes[0], bytes[1]];
        match endian {
            Endian::Little => u16::from_le_bytes(word),
            Endian::Big => u16::from_be_bytes(word),
        }
    }

    fn encode(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.to_le_bytes());
    }
}

impl Voxel for f32 {
    const MODE: Mode = Mode::Float32;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        let word = [bytes[0], bytes[1], bytes[2], bytes[3]];
        match endian {
            Endian::Little => f32::from_le_bytes(word),
            Endian::Big => f32::from_be_bytes(word),
        }
    }

    fn encode(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.to_le_bytes());
    }
}

/// Voxel values of a [Volume], indexed as `[x, y, z]`
///
/// The element type read from file is kept so that cropping and writing never
/// changes the data.
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeData {
    /// 8-bit signed integers
    Int8(Array3<i8>),
    /// 16-bit signed integers
    Int16(Array3<i16>),
    /// 32-bit floats
    Float32(Array3<f32>),
    /// 16-bit unsigned integers
    Uint16(Array3<u16>),
}

impl VolumeData {
    /// Number of voxels along (x, y, z)
    pub fn shape(&self) -> [usize; 3] {
        let dim = match self {
            Self::Int8(a) => a.dim(),
            Self::Int16(a) => a.dim(),
            Self::Float32(a) => a.dim(),
            Self::Uint16(a) => a.dim(),
        };
        [dim.0, dim.1, dim.2]
    }

    /// MRC mode corresponding to the element type
    pub fn mode(&self) -> Mode {
        match self {
            Self::Int8(_) => Mode::Int8,
            Self::Int16(_) => Mode::Int16,
            Self::Float32(_) => Mode::Float32,
            Self::Uint16(_) => Mode::Uint16,
        }
    }

    /// Value at `[x, y, z]` as an f64, `None` if out of bounds
    pub fn get(&self, index: [usize; 3]) -> Option<f64> {
        match self {
            Self::Int8(a) => a.get(index).map(|v| (*v).into()),
            Self::Int16(a) => a.get(index).map(|v| (*v).into()),
            Self::Float32(a) => a.get(index).map(|v| (*v).into()),
            Self::Uint16(a) => a.get(index).map(|v| (*v).into()),
        }
    }

    /// Copy of the data converted to f64
    pub fn to_f64(&self) -> Array3<f64> {
        match self {
            Self::Int8(a) => a.mapv(f64::from),
            Self::Int16(a) => a.mapv(f64::from),
            Self::Float32(a) => a.mapv(f64::from),
            Self::Uint16(a) => a.mapv(f64::from),
        }
    }

    /// Independent copy of a rectangular region
    fn crop(&self, ranges: [Range<usize>; 3]) -> Self {
        match self {
            Self::Int8(a) => Self::Int8(region(a, &ranges)),
            Self::Int16(a) => Self::Int16(region(a, &ranges)),
            Self::Float32(a) => Self::Float32(region(a, &ranges)),
            Self::Uint16(a) => Self::Uint16(region(a, &ranges)),
        }
    }
}

/// Owned copy of `array[x, y, z]` for the given index ranges
fn region<T: Clone>(array: &Array3<T>, ranges: &[Range<usize>; 3]) -> Array3<T> {
    array
        .slice_each_axis(|axis| Slice::from(ranges[axis.axis.index()].clone()))
        .to_owned()
}

impl From<Array3<i8>> for VolumeData {
    fn from(array: Array3<i8>) -> Self {
        Self::Int8(array)
    }
}

impl From<Array3<i16>> for VolumeData {
    fn from(array: Array3<i16>) -> Self {
        Self::Int16(array)
    }
}

impl From<Array3<f32>> for VolumeData {
    fn from(array: Array3<f32>) -> Self {
        Self::Float32(array)
    }
}

impl From<Array3<u16>> for VolumeData {
    fn from(array: Array3<u16>) -> Self {
        Self::Uint16(array)
    }
}

/// A tomogram held in memory
///
/// Voxel values are indexed `[x, y, z]`, i.e. the column index of the MRC file
/// comes first. Mesh point coordinates use the same order.
///
/// ```rust
/// # use tomokit_volume::{Volume, Extents};
/// # use ndarray::Array3;
/// // Build a volume directly from an array
/// let volume = Volume::new(Array3::<f32>::zeros((300, 300, 300))).unwrap();
///
/// // Crop out the centre
/// let extents = Extents::new((100, 200), (100, 200), (100, 200));
/// let cropped = volume.crop(&extents).unwrap();
/// assert_eq!(cropped.shape(), [100, 100, 100]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Voxel values
    pub data: VolumeData,
    /// Voxel size in angstroms along (x, y, z)
    pub voxel_size: [f32; 3],
    /// Origin in angstroms
    pub origin: [f32; 3],
}

impl Volume {
    /// Create a volume with unit voxel size at the origin
    ///
    /// Every dimension must have at least one voxel.
    pub fn new(data: impl Into<VolumeData>) -> Result<Self> {
        let data = data.into();
        let shape = data.shape();
        if shape.iter().any(|n| *n == 0) {
            return Err(Error::InvalidDimensions(shape.map(|n| n as i64)));
        }

        Ok(Self {
            data,
            voxel_size: [1.0; 3],
            origin: [0.0; 3],
        })
    }

    /// Replace the voxel size
    pub fn with_voxel_size(mut self, voxel_size: [f32; 3]) -> Self {
        self.voxel_size = voxel_size;
        self
    }

    /// Number of voxels along (x, y, z)
    pub fn shape(&self) -> [usize; 3] {
        self.data.shape()
    }

    /// Total number of voxels
    pub fn number_of_voxels(&self) -> usize {
        self.shape().iter().product()
    }

    /// MRC mode of the stored element type
    pub fn mode(&self) -> Mode {
        self.data.mode()
    }

    /// Value at `[x, y, z]`, `None` if out of bounds
    pub fn get(&self, index: [usize; 3]) -> Option<f64> {
        self.data.get(index)
    }

    /// Crop a rectangular sub-volume
    ///
    /// Returns a new, independent volume holding exactly the voxels selected by
    /// the [Extents]. No interpolation is done. The voxel size is unchanged and
    /// the origin is moved to the first voxel of the region.
    pub fn crop(&self, extents: &Extents) -> Result<Self> {
        let ranges = extents.validate(self.shape())?;

        let mut origin = self.origin;
        for (axis, range) in ranges.iter().enumerate() {
            origin[axis] += range.start as f32 * self.voxel_size[axis];
        }

        Ok(Self {
            data: self.data.crop(ranges),
            voxel_size: self.voxel_size,
            origin,
        })
    }
}

impl std::fmt::Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [nx, ny, nz] = self.shape();
        let mut s = "Volume {\n".to_string();
        s += &f!(
            "    voxels: {} ({}x{}x{})\n",
            self.number_of_voxels(),
            nx,
            ny,
            nz
        );
        s += &f!("    mode: {}\n", self.mode());
        s += &f!("    voxel size: {}\n", self.voxel_size.display_xyz(3));
        s += &f!("    origin: {}\n}}", self.origin.display_xyz(3));
        write!(f, "{}", s)
    }
}

/// Cropping region as (start, end) pairs along x, y, and z
///
/// Ranges are half open, so `(100, 200)` selects indices 100 to 199. Signed
/// values are accepted so that invalid input can be reported rather than
/// silently wrapped, and negative values are never interpreted as offsets from
/// the end.
///
/// The default selects `100..200` on every axis.
///
/// Extents can also be parsed from text, which is useful on the command line:
///
/// ```rust
/// # use tomokit_volume::Extents;
/// let extents: Extents = "0:64, 10:74, 100:164".parse().unwrap();
/// assert_eq!(extents, Extents::new((0, 64), (10, 74), (100, 164)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extents(pub [(i64, i64); 3]);

impl Extents {
    /// Extents from (start, end) pairs for each axis
    pub fn new(x: (i64, i64), y: (i64, i64), z: (i64, i64)) -> Self {
        Self([x, y, z])
    }

    /// Extents covering an entire volume of the given shape
    pub fn full(shape: [usize; 3]) -> Self {
        Self(shape.map(|n| (0, n as i64)))
    }

    /// Number of voxels selected along (x, y, z)
    ///
    /// Only meaningful for valid extents, invalid pairs report zero.
    pub fn shape(&self) -> [usize; 3] {
        self.0.map(|(start, end)| end.saturating_sub(start).max(0) as usize)
    }

    /// Check the extents against a volume shape
    ///
    /// Every axis must satisfy `0 <= start < end <= length`.
    pub fn validate(&self, shape: [usize; 3]) -> Result<[Range<usize>; 3]> {
        let mut ranges: [Range<usize>; 3] = [0..0, 0..0, 0..0];

        for (axis, ((start, end), length)) in self.0.iter().zip(shape).enumerate() {
            if *start < 0 || start >= end || *end > length as i64 {
                return Err(Error::ExtentOutOfRange {
                    axis,
                    start: *start,
                    end: *end,
                    length,
                });
            }
            ranges[axis] = (*start as usize)..(*end as usize);
        }

        Ok(ranges)
    }
}

impl Default for Extents {
    fn default() -> Self {
        Self([(100, 200); 3])
    }
}

impl FromStr for Extents {
    type Err = Error;

    /// Parse `x0:x1,y0:y1,z0:z1`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidExtents(s.to_string());

        let pairs = s
            .split(',')
            .map(|pair| {
                let (start, end) = pair.split_once(':').ok_or_else(invalid)?;
                let start = start.trim().parse::<i64>().map_err(|_| invalid())?;
                let end = end.trim().parse::<i64>().map_err(|_| invalid())?;
                Ok((start, end))
            })
            .collect::<Result<Vec<(i64, i64)>>>()?;

        match pairs.into_iter().collect_tuple() {
            Some((x, y, z)) => Ok(Self::new(x, y, z)),
            None => Err(invalid()),
        }
    }
}

impl std::fmt::Display for Extents {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = self
            .0
            .iter()
            .map(|(start, end)| f!("{start}:{end}"))
            .join(",");
        write!(f, "{s}")
    }
}

/// Arrange raw voxel values in file order into `[x, y, z]` indexing
///
/// MRC data run fastest along columns (x), then rows (y), then sections (z).
pub(crate) fn arrange<T: Voxel>(values: Vec<T>, shape: [usize; 3]) -> Result<Array3<T>> {
    let [nx, ny, nz] = shape;
    let sections_first = Array3::from_shape_vec((nz, ny, nx), values)?;
    let columns_first = sections_first.reversed_axes();
    let standard = columns_first.as_standard_layout().into_owned();
    Ok(standard)
}

/// View of `[x, y, z]` data that iterates in file order
pub(crate) fn in_file_order<T: Voxel>(array: &Array3<T>) -> ArrayView3<'_, T> {
    array.view().reversed_axes()
}
