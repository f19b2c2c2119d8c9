// standard library
use std::path::PathBuf;

// tomokit modules
use tomokit_pick::vtk::VtkFormat;
use tomokit_sample::{Boundary, Order};
use tomokit_volume::Extents;

// external crates
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Cropping, sampling, and export of cryo-ET tomograms and membrane meshes
#[derive(Parser, Debug)]
#[command(name = "tomokit", version, about, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download the pretrained segmentation checkpoint
    FetchModel {
        /// Destination file or directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Download and extract the tutorial data
    FetchData {
        /// Directory to extract into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Crop a sub-volume out of a tomogram
    Crop {
        /// Tomogram to crop
        input: PathBuf,

        /// Where to write the cropped tomogram
        output: PathBuf,

        /// Half open voxel ranges as x0:x1,y0:y1,z0:z1
        #[arg(short, long, default_value_t = Extents::default())]
        extents: Extents,
    },

    /// Sample a tomogram at membrane mesh points
    Sample {
        /// Dataset directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Dataset layout as JSON, overriding the tutorial layout
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Membrane identifier(s), all membranes of the dataset if omitted
        #[arg(short, long)]
        membrane: Vec<String>,

        /// Divide mesh coordinates by this factor (e.g. voxel size)
        #[arg(short, long, default_value_t = 1.0)]
        scale: f64,

        /// Interpolation order (0, 1, or 3)
        #[arg(long, default_value = "1", value_parser = parse_order)]
        order: Order,

        /// Boundary mode: nearest, mirror, reflect, or constant[=value]
        #[arg(long, default_value = "nearest")]
        boundary: Boundary,

        /// Download the tutorial data if files are missing
        #[arg(long)]
        fetch: bool,

        /// Write the records to a VTK file
        #[arg(long)]
        vtk: Option<PathBuf>,

        /// VTK file format
        #[arg(long, value_enum, default_value_t = Format::Binary)]
        format: Format,

        /// Write the records to JSON file(s)
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

/// VTK output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Legacy text format
    Ascii,
    /// Legacy binary format
    Binary,
    /// XML unstructured grid (.vtu)
    Xml,
}

impl From<Format> for VtkFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Ascii => VtkFormat::LegacyAscii,
            Format::Binary => VtkFormat::LegacyBinary,
            Format::Xml => VtkFormat::Xml,
        }
    }
}

fn parse_order(s: &str) -> Result<Order, String> {
    let number = s.parse::<u8>().map_err(|e| e.to_string())?;
    Order::try_from(number).map_err(|e| e.to_string())
}
