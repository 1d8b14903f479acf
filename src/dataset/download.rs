//! Fetching and unpacking the dataset archive.

use super::{DatasetError, LastFmTables, ARTISTS_FILE};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);
const ARCHIVE_FILE_NAME: &str = "lastfm.zip";
const STAGING_DIR_NAME: &str = ".lastfm-extract";

pub fn dataset_present(dir: &Path) -> bool {
    dir.join(ARTISTS_FILE).is_file()
}

fn progress_bar(total: Option<u64>) -> ProgressBar {
    match total {
        Some(len) => {
            let pb = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
            {
                pb.set_style(style.progress_chars("=> "));
            }
            pb
        }
        None => ProgressBar::new_spinner(),
    }
}

fn remove_leftover(path: &Path) {
    let removed = if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.exists() {
        fs::remove_file(path)
    } else {
        return;
    };
    if let Err(err) = removed {
        warn!("Could not remove {}: {}", path.display(), err);
    }
}

/// Downloads the dataset zip into `dir` and installs it there. Nothing of a
/// failed download is left behind.
pub fn download_dataset(dir: &Path, url: &str) -> Result<(), DatasetError> {
    fs::create_dir_all(dir)?;
    info!("Downloading dataset from {}...", url);

    let client = Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| DatasetError::Download(e.to_string()))?;
    let response = client
        .get(url)
        .send()
        .map_err(|e| DatasetError::Download(e.to_string()))?;
    if !response.status().is_success() {
        return Err(DatasetError::Download(format!(
            "{} answered with status {}",
            url,
            response.status()
        )));
    }

    let pb = progress_bar(response.content_length());
    pb.set_message("lastfm");
    let archive_path = dir.join(ARCHIVE_FILE_NAME);
    let copied = File::create(&archive_path).and_then(|mut archive_file| {
        io::copy(&mut pb.wrap_read(response), &mut archive_file)
    });
    pb.finish_and_clear();
    if let Err(err) = copied {
        remove_leftover(&archive_path);
        return Err(err.into());
    }

    info!("Extracting files...");
    let extracted = install_archive(&archive_path, dir)?;
    info!("Extracted {} files into {}", extracted, dir.display());
    Ok(())
}

/// Extracts the archive into a staging directory next to the dataset and
/// moves the files into `dir`, the artist table last, so [`dataset_present`]
/// only holds once every table is in place. The archive and the staging
/// directory are removed whether or not this succeeds.
pub fn install_archive(archive_path: &Path, dir: &Path) -> Result<usize, DatasetError> {
    let staging = dir.join(STAGING_DIR_NAME);
    let installed = stage_and_move(archive_path, dir, &staging);
    remove_leftover(&staging);
    remove_leftover(archive_path);
    installed
}

fn stage_and_move(
    archive_path: &Path,
    dir: &Path,
    staging: &Path,
) -> Result<usize, DatasetError> {
    remove_leftover(staging);
    fs::create_dir_all(staging)?;

    let extracted = extract_archive(archive_path, staging)?;
    if !dataset_present(staging) {
        return Err(DatasetError::ZipError(format!("archive has no {}", ARTISTS_FILE)));
    }

    let mut names = fs::read_dir(staging)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<Result<Vec<_>, _>>()?;
    names.sort_by_key(|name| name == ARTISTS_FILE);
    for name in names.iter() {
        fs::rename(staging.join(name), dir.join(name))?;
    }
    Ok(extracted)
}

/// Extracts every regular file of the archive into `dir`, flattening any
/// directory prefix. Returns the number of files written.
pub fn extract_archive(archive_path: &Path, dir: &Path) -> Result<usize, DatasetError> {
    let file = File::open(archive_path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| DatasetError::ZipError(e.to_string()))?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| DatasetError::ZipError(e.to_string()))?;
        if entry.is_dir() {
            continue;
        }
        let file_name = match entry
            .enclosed_name()
            .and_then(|p| p.file_name().map(|n| n.to_owned()))
        {
            Some(name) => name,
            None => {
                warn!("Skipping unsafe archive entry {}", entry.name());
                continue;
            }
        };

        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;
        fs::write(dir.join(file_name), &content)?;
        written += 1;
    }
    Ok(written)
}

/// Reads the dataset from `dir`, fetching it first when it is missing and
/// `download_if_missing` is set.
pub fn ensure_dataset(
    dir: &Path,
    url: &str,
    download_if_missing: bool,
) -> Result<LastFmTables, DatasetError> {
    if !dataset_present(dir) {
        if download_if_missing {
            info!("Dataset not found in {}, downloading...", dir.display());
            download_dataset(dir, url)?;
        } else {
            warn!(
                "Dataset not found in {} and downloading is disabled",
                dir.display()
            );
        }
    }
    LastFmTables::read(dir)
}
