// standard library
use std::path::{Path, PathBuf};
use std::process::Command;

// crate modules
use crate::dataset::{Dataset, DatasetPaths};
use crate::error::{Error, Result};
use crate::fetch::{download_file, TUTORIAL_ARCHIVE_URL};

// external crates
use log::{debug, info};

/// Source of the files for a membrane
///
/// Separates where the data come from (an existing directory, a download,
/// something else) from the code that reads it.
pub trait DatasetProvider {
    /// Make the files of a membrane available and return their paths
    fn fetch(&self, identifier: &str) -> Result<DatasetPaths>;

    /// Make the files of several membranes available, stopping at the first
    /// failure
    fn fetch_all<S: AsRef<str>>(&self, identifiers: &[S]) -> Result<Vec<DatasetPaths>>
    where
        Self: Sized,
    {
        identifiers
            .iter()
            .map(|id| self.fetch(id.as_ref()))
            .collect()
    }
}

/// Data that already exist on disk
///
/// ```rust, no_run
/// # use tomokit_pick::{Dataset, DatasetProvider, LocalProvider};
/// let provider = LocalProvider::new(Dataset::new("./data"));
/// let paths = provider.fetch("T1S1M12").unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalProvider {
    /// Layout of the files
    pub dataset: Dataset,
}

impl LocalProvider {
    /// Provider for an existing dataset
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DatasetProvider for LocalProvider {
    fn fetch(&self, identifier: &str) -> Result<DatasetPaths> {
        let paths = self.dataset.paths(identifier)?;
        paths.verify()?;
        Ok(paths)
    }
}

/// Unpacks a downloaded archive
pub trait Extractor {
    /// Extract every file in `archive` into the `destination` directory
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()>;
}

/// Extracts zip archives with the system `unzip` command
#[derive(Debug, Clone, Copy, Default)]
pub struct UnzipCommand;

impl Extractor for UnzipCommand {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()> {
        debug!("unzip -o -q {} -d {}", archive.display(), destination.display());
        let output = Command::new("unzip")
            .arg("-o")
            .arg("-q")
            .arg(archive)
            .arg("-d")
            .arg(destination)
            .output()
            .map_err(|e| Error::ExtractionFailed {
                archive: archive.to_path_buf(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::ExtractionFailed {
                archive: archive.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Data fetched from an archive when not already on disk
///
/// The archive is downloaded into the dataset root and extracted there the
/// first time a membrane is missing. Later calls find the files and do
/// nothing. An archive file that already exists is not downloaded again.
///
/// ```rust, no_run
/// # use tomokit_pick::{ArchiveProvider, Dataset, DatasetProvider};
/// // tutorial data from Zenodo, extracted with `unzip`
/// let provider = ArchiveProvider::new(Dataset::default());
/// let paths = provider.fetch("T1S1M12").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveProvider<E: Extractor = UnzipCommand> {
    /// Layout of the files once extracted
    pub dataset: Dataset,
    /// Where to download the archive from
    pub url: String,
    /// File name of the archive in the dataset root
    pub archive_name: String,
    /// How to unpack the archive
    pub extractor: E,
}

impl ArchiveProvider<UnzipCommand> {
    /// Tutorial archive provider for the given layout
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            url: TUTORIAL_ARCHIVE_URL.to_string(),
            archive_name: "membrain_tutorial.zip".to_string(),
            extractor: UnzipCommand,
        }
    }
}

impl<E: Extractor> ArchiveProvider<E> {
    /// Replace the archive URL
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Replace the extraction method
    pub fn with_extractor<X: Extractor>(self, extractor: X) -> ArchiveProvider<X> {
        ArchiveProvider {
            dataset: self.dataset,
            url: self.url,
            archive_name: self.archive_name,
            extractor,
        }
    }

    /// Full path of the archive file
    pub fn archive_path(&self) -> PathBuf {
        self.dataset.root.join(&self.archive_name)
    }

    /// Download and extract the archive into the dataset root
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dataset.root)?;

        let archive = self.archive_path();
        if archive.is_file() {
            debug!("Using existing archive {}", archive.display());
        } else {
            info!("Downloading data, this can take a few minutes");
            download_file(&self.url, &archive)?;
        }

        info!("Extracting {}", archive.display());
        self.extractor.extract(&archive, &self.dataset.root)
    }
}

impl<E: Extractor> DatasetProvider for ArchiveProvider<E> {
    fn fetch(&self, identifier: &str) -> Result<DatasetPaths> {
        let paths = self.dataset.paths(identifier)?;
        if paths.first_missing().is_some() {
            self.prepare()?;
        }
        paths.verify()?;
        Ok(paths)
    }

    /// Extracts the archive at most once for the whole set
    fn fetch_all<S: AsRef<str>>(&self, identifiers: &[S]) -> Result<Vec<DatasetPaths>> {
        let paths = identifiers
            .iter()
            .map(|id| self.dataset.paths(id.as_ref()))
            .collect::<Result<Vec<DatasetPaths>>>()?;

        if paths.iter().any(|p| p.first_missing().is_some()) {
            self.prepare()?;
        }

        for p in &paths {
            p.verify()?;
        }
        Ok(paths)
    }
}
