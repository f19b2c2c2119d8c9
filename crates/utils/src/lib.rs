//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, prettier formatting for scientific numbers and coordinates, or
//! summary statistics over voxel values, are useful everywhere.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod error;
mod option_ext;
mod stats_ext;
mod value_ext;

// Flatten
pub use error::{Error, Result};
pub use option_ext::OptionExt;
pub use stats_ext::{StatsExt, Summary};
pub use value_ext::{CoordinateExt, ValueExt};
