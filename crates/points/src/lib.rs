#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but expose as single module
mod error;
#[cfg(feature = "hdf5")]
mod h5;
mod mesh;
mod parsers;
mod star;

#[doc(inline)]
pub use crate::mesh::{read_mesh_file, write_mesh_file, MeshPointSet};

#[doc(inline)]
pub use crate::star::{parse_star, read_star_file, PositionList};

#[doc(inline)]
pub use crate::error::{Error, Result};
