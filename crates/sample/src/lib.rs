#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but expose as single module
mod boundary;
mod error;
mod order;
mod sampler;
mod scale;
mod spline;

#[doc(inline)]
pub use crate::boundary::Boundary;

#[doc(inline)]
pub use crate::order::Order;

#[doc(inline)]
pub use crate::sampler::{sample_points, PreparedVolume, Sampler, SamplerBuilder};

#[doc(inline)]
pub use crate::scale::{rescale_points, ScaleFactor};

#[doc(inline)]
pub use crate::error::{Error, Result};
