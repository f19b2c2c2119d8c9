//! Conversion of sampled records to VTK formats for plotting
//!
//! Membrane points are written as vertices carrying the sampled tomogram
//! values, and the positions of particles as small spheres, for viewing in
//! ParaView or similar.
//!
//! ```rust, no_run
//! # use tomokit_pick::vtk::{write_vtk, RecordToVtk, VtkFormat};
//! # use tomokit_pick::SampledRecord;
//! # fn record() -> SampledRecord { unimplemented!() }
//! let vtk = RecordToVtk::builder()
//!     .sphere_radius(4.0)
//!     .build()
//!     .convert(&record());
//!
//! write_vtk(vtk, "./membrane.vtk", VtkFormat::LegacyBinary).unwrap();
//! ```

mod builder;
mod convert;
mod sphere;

// standard library
use std::path::Path;

// crate modules
use crate::error::Result;

// external crates
use log::debug;
use vtkio::model::{ByteOrder, Vtk};

#[doc(inline)]
pub use builder::RecordToVtkBuilder;

#[doc(inline)]
pub use convert::RecordToVtk;

#[doc(inline)]
pub use sphere::sphere_surface;

/// Available VTK output formats
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VtkFormat {
    /// Legacy `.vtk` text file
    LegacyAscii,
    /// Legacy `.vtk` binary file, in the byte order of the [Vtk]
    #[default]
    LegacyBinary,
    /// XML unstructured grid, written with a `.vtu` extension
    Xml,
}

/// Write a [Vtk] to a file in one of several formats
///
/// XML files always get a `.vtu` extension as the format is inferred from it.
pub fn write_vtk<P: AsRef<Path>>(vtk: Vtk, path: P, format: VtkFormat) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing {format:?} vtk to {}", path.display());

    match format {
        VtkFormat::LegacyAscii => vtk.export_ascii(path)?,
        VtkFormat::LegacyBinary => match vtk.byte_order {
            ByteOrder::BigEndian => vtk.export_be(path)?,
            ByteOrder::LittleEndian => vtk.export_le(path)?,
        },
        VtkFormat::Xml => vtk.export(path.with_extension("vtu"))?,
    }

    Ok(())
}
