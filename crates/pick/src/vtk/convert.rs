// tomokit modules
use tomokit_utils::f;

// internal modules
use crate::record::SampledRecord;
use crate::vtk::sphere::sphere_surface;
use crate::vtk::RecordToVtkBuilder;

// external crates
use log::trace;
use vtkio::model::{
    Attribute, Attributes, ByteOrder, CellType, Cells, DataArray, DataSet, ElementType, IOBuffer,
    UnstructuredGridPiece, Version, VertexNumbers, Vtk,
};

/// Convert sampled records to vtk formats for plotting
///
/// Everything ends up in a single unstructured grid:
///
/// - every membrane point is a vertex cell
/// - every position is a sphere surface made of quad cells, or a vertex cell
///   if spheres are disabled
///
/// Point data arrays are attached to the grid:
///
/// | Name       | Content                                           |
/// | ---------- | ------------------------------------------------- |
/// | `tomogram` | sampled tomogram value, NaN for position points   |
/// | `score`    | point score, NaN where there is none (optional)   |
/// | `membrane` | index of the record the point came from           |
///
/// The fields remain public for direct use, but for convenience and style
/// preference a builder pattern is also implemented and recommended.
///
/// ```rust
/// # use tomokit_pick::vtk::RecordToVtk;
/// # use vtkio::model::ByteOrder;
/// // Positions as vertices, little endian binary
/// let converter = RecordToVtk::builder()
///     .spheres(false)
///     .byte_order(ByteOrder::LittleEndian)
///     .build();
/// ```
#[derive(Debug, PartialEq)]
pub struct RecordToVtk {
    /// Byte ordering as big or little endian
    pub byte_order: ByteOrder,
    /// Offset along z for each record
    pub z_shifts: Vec<f64>,
    /// Draw positions as spheres rather than single vertices
    pub spheres: bool,
    /// Radius of position spheres
    pub sphere_radius: f64,
    /// Number of polar and azimuthal divisions of the sphere surface
    pub sphere_resolution: usize,
    /// Include scores as point data
    pub include_scores: bool,
}

// Public API
impl RecordToVtk {
    /// Start with the default configuration
    pub fn new() -> RecordToVtk {
        Default::default()
    }

    /// Get an instance of the [RecordToVtkBuilder]
    pub fn builder() -> RecordToVtkBuilder {
        RecordToVtkBuilder::default()
    }

    /// Convert a single [SampledRecord] to a vtkio::Vtk object
    pub fn convert(&self, record: &SampledRecord) -> Vtk {
        self.convert_all(std::slice::from_ref(record))
    }

    /// Convert several [SampledRecord]s into one vtkio::Vtk object
    pub fn convert_all(&self, records: &[SampledRecord]) -> Vtk {
        let mut grid = Grid::default();
        for (index, record) in records.iter().enumerate() {
            self.add_record(&mut grid, index, record);
        }

        trace!(
            "{} records to {} vtk points, {} cells",
            records.len(),
            grid.tomogram.len(),
            grid.types.len()
        );

        let with_scores = self.include_scores && records.iter().any(|r| r.scores.is_some());

        Vtk {
            version: Version::Auto,
            title: f!("tomokit sampled membranes ({})", records.len()),
            byte_order: self.byte_order,
            file_path: None,
            data: DataSet::inline(UnstructuredGridPiece {
                points: grid.points.into(),
                cells: Cells {
                    cell_verts: VertexNumbers::XML {
                        connectivity: grid.connectivity,
                        offsets: grid.offsets,
                    },
                    types: grid.types,
                },
                data: Self::attributes(grid.tomogram, grid.scores, grid.membrane, with_scores),
            }),
        }
    }
}

impl Default for RecordToVtk {
    fn default() -> Self {
        RecordToVtkBuilder::default().build()
    }
}

impl RecordToVtk {
    fn add_record(&self, grid: &mut Grid, index: usize, record: &SampledRecord) {
        let shift = self.z_shifts.get(index).copied().unwrap_or(0.0);
        let membrane = index as f64;

        for (i, point) in record.points.iter().enumerate() {
            let value = record.tomogram_values.get(i).copied().unwrap_or(f64::NAN);
            let score = record
                .scores
                .as_ref()
                .and_then(|s| s.get(i).copied())
                .unwrap_or(f64::NAN);

            let id = grid.push_point([point[0], point[1], point[2] + shift], value, score, membrane);
            grid.push_cell(&[id], CellType::Vertex);
        }

        for position in &record.positions {
            if self.spheres {
                self.add_sphere(grid, *position, membrane);
            } else {
                let id = grid.push_point(*position, f64::NAN, f64::NAN, membrane);
                grid.push_cell(&[id], CellType::Vertex);
            }
        }
    }

    /// Quad cells between neighbouring grid points of a sphere surface
    fn add_sphere(&self, grid: &mut Grid, center: [f64; 3], membrane: f64) {
        let n = self.sphere_resolution;
        let surface = sphere_surface(center, self.sphere_radius, n);

        let first = grid.next_id();
        for point in surface {
            grid.push_point(point, f64::NAN, f64::NAN, membrane);
        }

        let id = |i: usize, j: usize| first + (i * n + j) as u64;
        for i in 0..n.saturating_sub(1) {
            for j in 0..n - 1 {
                grid.push_cell(
                    &[id(i, j), id(i + 1, j), id(i + 1, j + 1), id(i, j + 1)],
                    CellType::Quad,
                );
            }
        }
    }

    fn attributes(
        tomogram: Vec<f64>,
        scores: Vec<f64>,
        membrane: Vec<f64>,
        with_scores: bool,
    ) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.point.push(Self::scalars("tomogram", tomogram));
        if with_scores {
            attributes.point.push(Self::scalars("score", scores));
        }
        attributes.point.push(Self::scalars("membrane", membrane));
        attributes
    }

    fn scalars(name: &str, values: Vec<f64>) -> Attribute {
        Attribute::DataArray(DataArray {
            name: name.to_string(),
            elem: ElementType::Scalars {
                num_comp: 1,
                lookup_table: None,
            },
            data: IOBuffer::F64(values),
        })
    }
}

/// Flat vertex and cell lists of an unstructured grid under construction
#[derive(Debug, Default)]
struct Grid {
    points: Vec<f64>,
    connectivity: Vec<u64>,
    offsets: Vec<u64>,
    types: Vec<CellType>,
    tomogram: Vec<f64>,
    scores: Vec<f64>,
    membrane: Vec<f64>,
}

impl Grid {
    fn next_id(&self) -> u64 {
        self.tomogram.len() as u64
    }

    fn push_point(&mut self, point: [f64; 3], value: f64, score: f64, membrane: f64) -> u64 {
        let id = self.next_id();
        self.points.extend_from_slice(&point);
        self.tomogram.push(value);
        self.scores.push(score);
        self.membrane.push(membrane);
        id
    }

    fn push_cell(&mut self, vertices: &[u64], cell_type: CellType) {
        self.connectivity.extend_from_slice(vertices);
        self.offsets.push(self.connectivity.len() as u64);
        self.types.push(cell_type);
    }
}
