//! `tomokit` is a semi-modular toolkit for cryo-electron tomography membrane
//! point picking
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use tomokit_utils as utils;

#[cfg(feature = "pick")]
#[cfg_attr(docsrs, doc(cfg(feature = "pick")))]
#[doc(inline)]
pub use tomokit_pick as pick;

#[cfg(feature = "points")]
#[cfg_attr(docsrs, doc(cfg(feature = "points")))]
#[doc(inline)]
pub use tomokit_points as points;

#[cfg(feature = "sample")]
#[cfg_attr(docsrs, doc(cfg(feature = "sample")))]
#[doc(inline)]
pub use tomokit_sample as sample;

#[cfg(feature = "volume")]
#[cfg_attr(docsrs, doc(cfg(feature = "volume")))]
#[doc(inline)]
pub use tomokit_volume as volume;
