// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// crate modules
use crate::error::{Error, Result};

// tomokit modules
use tomokit_utils::f;

// external crates
use log::{info, warn};

/// Zenodo download of the tutorial archive
pub const TUTORIAL_ARCHIVE_URL: &str =
    "https://zenodo.org/api/records/14610597/files/membrain_tutorial.zip/content";

/// Google Drive file id of the pretrained segmentation checkpoint
pub const CHECKPOINT_ID: &str = "1tSQIz_UCsQZNfyHg0RxD-4meFgolszo8";

/// Default file name of the pretrained segmentation checkpoint
pub const CHECKPOINT_NAME: &str = "membrain_v10_alpha.ckpt";

/// Download anything to a file
///
/// Plain GET request, following redirects. The destination is overwritten if
/// it exists. Returns the number of bytes written.
///
/// ```rust, no_run
/// # use tomokit_pick::{download_file, TUTORIAL_ARCHIVE_URL};
/// let n = download_file(TUTORIAL_ARCHIVE_URL, "./membrain_tutorial.zip").unwrap();
/// println!("{n} bytes downloaded");
/// ```
pub fn download_file<P: AsRef<Path>>(url: &str, destination: P) -> Result<usize> {
    info!("Downloading {url}");
    let response = minreq::get(url).send()?;

    if !(200..300).contains(&response.status_code) {
        return Err(Error::BadResponse {
            url: url.to_string(),
            code: response.status_code,
        });
    }

    let is_html = response
        .headers
        .get("content-type")
        .is_some_and(|t| t.starts_with("text/html"));
    if is_html {
        warn!("Warning: {url} returned a web page rather than a file");
    }

    let bytes = response.as_bytes();
    let mut writer = BufWriter::new(File::create(destination.as_ref())?);
    writer.write_all(bytes)?;
    writer.flush()?;

    info!(
        "{} bytes written to {}",
        bytes.len(),
        destination.as_ref().display()
    );
    Ok(bytes.len())
}

/// Download the pretrained segmentation checkpoint
///
/// An existing directory as the destination stores the checkpoint inside it
/// as `membrain_v10_alpha.ckpt`. Returns the path of the checkpoint file.
///
/// ```rust, no_run
/// # use tomokit_pick::download_checkpoint;
/// let path = download_checkpoint(".").unwrap();
/// println!("Checkpoint file is stored here: {}", path.display());
/// ```
pub fn download_checkpoint<P: AsRef<Path>>(destination: P) -> Result<PathBuf> {
    let destination = destination.as_ref();
    let path = if destination.is_dir() {
        destination.join(CHECKPOINT_NAME)
    } else {
        destination.to_path_buf()
    };

    download_file(&checkpoint_url(CHECKPOINT_ID), &path)?;
    Ok(path)
}

/// Direct download link for a shared Google Drive file
///
/// Skips the interstitial page Google shows for files too large to scan.
fn checkpoint_url(id: &str) -> String {
    f!("https://drive.usercontent.google.com/download?id={id}&export=download&confirm=t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_url() {
        assert_eq!(
            checkpoint_url("abc"),
            "https://drive.usercontent.google.com/download?id=abc&export=download&confirm=t"
        );
    }
}
