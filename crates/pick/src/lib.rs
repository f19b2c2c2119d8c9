#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but expose as single module
mod dataset;
mod error;
mod fetch;
mod provider;
mod record;
pub mod vtk;

#[doc(inline)]
pub use crate::dataset::{Dataset, DatasetPaths, TUTORIAL_MEMBRANES};

#[doc(inline)]
pub use crate::fetch::{
    download_checkpoint, download_file, CHECKPOINT_ID, CHECKPOINT_NAME, TUTORIAL_ARCHIVE_URL,
};

#[doc(inline)]
pub use crate::provider::{ArchiveProvider, DatasetProvider, Extractor, LocalProvider, UnzipCommand};

#[doc(inline)]
pub use crate::record::{
    build_sampled_record, load_membrane_record, load_membrane_records, SampledRecord,
};

#[doc(inline)]
pub use crate::error::{Error, Result};
