// internal modules
use crate::vtk::RecordToVtk;

// external crates
use log::warn;
use vtkio::model::ByteOrder;

/// Builder implementation for RecordToVtk configuration
///
/// The fields of [RecordToVtk] are left public for direct use but the module
/// also implements a builder.
///
/// The builder allows for chained setter calls. Any number of parameters can
/// be set this way (including none).
///
/// To get the final [RecordToVtk] from the builder, call
/// [build()](RecordToVtkBuilder::build).
///
/// ```rust, no_run
/// # use tomokit_pick::vtk::{write_vtk, RecordToVtk, VtkFormat};
/// # use tomokit_pick::SampledRecord;
/// # use vtkio::model::ByteOrder;
/// # fn records() -> Vec<SampledRecord> { unimplemented!() }
/// // Make a new builder, change some values
/// let converter = RecordToVtk::builder()
///     .byte_order(ByteOrder::LittleEndian)
///     .z_shifts(vec![0.0, 40.0, 80.0])
///     .sphere_radius(4.0)
///     .sphere_resolution(10)
///     .include_scores(true)
///     .build();
///
/// // Convert a set of records using the parameters set
/// let vtk = converter.convert_all(&records());
///
/// // Write to "output.vtk" using the old ASCII text format
/// write_vtk(vtk, "./output.vtk", VtkFormat::LegacyAscii).unwrap();
/// ```
#[derive(Debug)]
pub struct RecordToVtkBuilder {
    /// Byte ordering as big or little endian
    byte_order: ByteOrder,
    /// Offset along z for each record
    z_shifts: Vec<f64>,
    /// Draw positions as spheres rather than single vertices
    spheres: bool,
    /// Radius of position spheres
    sphere_radius: f64,
    /// Number of polar and azimuthal divisions of the sphere surface
    sphere_resolution: usize,
    /// Include scores as point data
    include_scores: bool,
}

impl RecordToVtkBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [RecordToVtk] type
    pub fn build(self) -> RecordToVtk {
        RecordToVtk {
            byte_order: self.byte_order,
            z_shifts: self.z_shifts,
            spheres: self.spheres,
            sphere_radius: self.sphere_radius,
            sphere_resolution: self.sphere_resolution,
            include_scores: self.include_scores,
        }
    }

    /// Set the byte ordering
    ///
    /// Only matters for the legacy binary format. Some plotting tools only
    /// read big endian, which is the default.
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Offset the membrane points of each record along z
    ///
    /// The i-th shift applies to the i-th record converted, records without a
    /// shift are left in place. Useful for separating stacked membranes.
    pub fn z_shifts(mut self, shifts: Vec<f64>) -> Self {
        self.z_shifts = shifts;
        self
    }

    /// Draw positions as sphere surfaces
    ///
    /// Enabled by default, otherwise each position is a single vertex.
    pub fn spheres(mut self, spheres: bool) -> Self {
        self.spheres = spheres;
        self
    }

    /// Radius of the position spheres
    pub fn sphere_radius(mut self, radius: f64) -> Self {
        self.sphere_radius = radius;
        self
    }

    /// Sphere surface resolution
    ///
    /// Every sphere has `resolution^2` points, so large values may
    /// significantly increase file sizes for many positions.
    pub fn sphere_resolution(mut self, resolution: usize) -> Self {
        if resolution < 3 {
            warn!("Warning: Sphere resolution below 3 gives degenerate surfaces");
        }
        self.sphere_resolution = resolution;
        self
    }

    /// Include scores as point data
    ///
    /// Points without a score, and sphere points, are given NaN.
    pub fn include_scores(mut self, include: bool) -> Self {
        self.include_scores = include;
        self
    }
}

impl Default for RecordToVtkBuilder {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::BigEndian,
            z_shifts: Vec::new(),
            spheres: true,
            sphere_radius: 4.0,
            sphere_resolution: 10,
            include_scores: true,
        }
    }
}
