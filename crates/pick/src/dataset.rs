// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// crate modules
use crate::error::{Error, Result};

// tomokit modules
use tomokit_utils::f;

// external crates
use serde::{Deserialize, Serialize};

/// Membranes segmented in the tutorial tomogram
pub const TUTORIAL_MEMBRANES: [&str; 5] = ["T1S1M12", "T1S1M14", "T1S1M16", "T1S1M17", "T1S1M19"];

/// Layout of a tomogram and its membrane files on disk
///
/// Every membrane has a mesh file and a STAR file of positions, named after
/// the tomogram prefix and the membrane identifier.
///
/// ```text
/// <root>/
/// ├── Tomo0001.mrc
/// ├── mesh_data/
/// │   └── Tomo0001_T1S1M12.h5
/// └── positions/
///     └── Tomo0001_T1S1M12.star
/// ```
///
/// The default is the layout of the tutorial data in the current directory.
/// A dataset may also be read from a JSON file, where any missing entries
/// take their default values.
///
/// ```rust
/// # use tomokit_pick::Dataset;
/// # use std::path::Path;
/// let dataset = Dataset::new("./data");
///
/// assert_eq!(dataset.tomogram_path(), Path::new("./data/Tomo0001.mrc"));
/// assert_eq!(
///     dataset.mesh_path("T1S1M12").unwrap(),
///     Path::new("./data/mesh_data/Tomo0001_T1S1M12.h5")
/// );
/// assert!(dataset.mesh_path("T9S9M99").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    /// Base directory, all other paths are relative to this
    pub root: PathBuf,
    /// Tomogram file name
    pub tomogram: PathBuf,
    /// Directory of mesh point files
    pub mesh_dir: PathBuf,
    /// Directory of STAR position files
    pub positions_dir: PathBuf,
    /// Prefix shared by the mesh and position file names
    pub prefix: String,
    /// Extension of the mesh point files
    pub mesh_extension: String,
    /// Membrane identifiers allowed for this dataset
    pub identifiers: Vec<String>,
}

impl Dataset {
    /// Default layout under a different base directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Read a dataset layout from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Fail for identifiers not listed in the dataset
    pub fn check_identifier(&self, identifier: &str) -> Result<()> {
        if self.identifiers.iter().any(|id| id == identifier) {
            Ok(())
        } else {
            Err(Error::UnknownIdentifier {
                identifier: identifier.to_string(),
                allowed: self.identifiers.clone(),
            })
        }
    }

    /// Full path to the tomogram
    pub fn tomogram_path(&self) -> PathBuf {
        self.root.join(&self.tomogram)
    }

    /// Full path to the mesh file of a membrane
    pub fn mesh_path(&self, identifier: &str) -> Result<PathBuf> {
        self.check_identifier(identifier)?;
        let name = f!("{}_{identifier}.{}", self.prefix, self.mesh_extension);
        Ok(self.root.join(&self.mesh_dir).join(name))
    }

    /// Full path to the STAR position file of a membrane
    pub fn positions_path(&self, identifier: &str) -> Result<PathBuf> {
        self.check_identifier(identifier)?;
        let name = f!("{}_{identifier}.star", self.prefix);
        Ok(self.root.join(&self.positions_dir).join(name))
    }

    /// Every path needed for a membrane
    pub fn paths(&self, identifier: &str) -> Result<DatasetPaths> {
        Ok(DatasetPaths {
            tomogram: self.tomogram_path(),
            mesh: self.mesh_path(identifier)?,
            positions: self.positions_path(identifier)?,
        })
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            tomogram: PathBuf::from("Tomo0001.mrc"),
            mesh_dir: PathBuf::from("mesh_data"),
            positions_dir: PathBuf::from("positions"),
            prefix: "Tomo0001".to_string(),
            mesh_extension: "h5".to_string(),
            identifiers: TUTORIAL_MEMBRANES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Resolved file paths for a single membrane
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPaths {
    /// Tomogram shared by every membrane
    pub tomogram: PathBuf,
    /// Mesh point file
    pub mesh: PathBuf,
    /// STAR position file
    pub positions: PathBuf,
}

impl DatasetPaths {
    /// First path that does not exist, if any
    pub fn first_missing(&self) -> Option<&Path> {
        [&self.tomogram, &self.mesh, &self.positions]
            .into_iter()
            .find(|p| !p.is_file())
            .map(|p| p.as_path())
    }

    /// Fail with the first path that does not exist
    pub fn verify(&self) -> Result<()> {
        match self.first_missing() {
            Some(path) => Err(Error::MissingDatasetFile(path.to_path_buf())),
            None => Ok(()),
        }
    }
}
