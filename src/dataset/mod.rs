//! Access to the LastFM hetrec2011 dataset files.

mod download;
mod tables;

pub use download::{
    dataset_present, download_dataset, ensure_dataset, extract_archive, install_archive,
};
pub use tables::{decode_latin1, LastFmTables, PlayRecord, TaggingEvent};

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_DATASET_URL: &str =
    "http://files.grouplens.org/datasets/hetrec2011/hetrec2011-lastfm-2k.zip";

pub const ARTISTS_FILE: &str = "artists.dat";
pub const USER_ARTISTS_FILE: &str = "user_artists.dat";
pub const TAGS_FILE: &str = "tags.dat";
pub const USER_TAGGED_ARTISTS_FILE: &str = "user_taggedartists.dat";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset unavailable, could not read {path:?}: {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    #[error("Malformed row in {file} at line {line}: {reason}")]
    Malformed {
        file: &'static str,
        line: usize,
        reason: String,
    },

    #[error("Dataset download failed: {0}")]
    Download(String),

    #[error("Zip extraction error: {0}")]
    ZipError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
