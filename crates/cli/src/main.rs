//! Command line interface for tomokit
//!
//! ```text
//! tomokit fetch-model --output .
//! tomokit fetch-data --dir ./tutorial
//! tomokit crop Tomo0001.mrc Tomo0001_cropped.mrc --extents 100:200,100:200,100:200
//! tomokit sample --dir ./tutorial -m T1S1M12 --scale 14.08 --vtk membranes.vtk
//! ```

mod cli;
mod commands;
mod error;

// standard library
use std::error::Error as _;
use std::process;

// crate modules
use crate::cli::{Cli, Command};
use crate::commands::SampleOptions;
use crate::error::Result;

// external crates
use clap::Parser;
use log::error;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    if let Err(e) = run(cli.command) {
        error!("{e}");
        let mut source = e.source();
        while let Some(cause) = source {
            error!("  caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}

/// Info by default, -v for debug, -vv for trace, -q for errors only
fn init_logging(cli: &Cli) -> Result<()> {
    stderrlog::new()
        .quiet(cli.quiet)
        .verbosity(2 + cli.verbose as usize)
        .show_module_names(false)
        .init()?;
    Ok(())
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::FetchModel { output } => commands::fetch_model(&output),
        Command::FetchData { dir } => commands::fetch_data(&dir),
        Command::Crop {
            input,
            output,
            extents,
        } => commands::crop(&input, &output, &extents),
        Command::Sample {
            dir,
            dataset,
            membrane,
            scale,
            order,
            boundary,
            fetch,
            vtk,
            format,
            json,
        } => commands::sample(SampleOptions {
            dir,
            dataset,
            membranes: membrane,
            scale,
            order,
            boundary,
            fetch,
            vtk,
            format,
            json,
        }),
    }
}
