//! Catalog loading functionality

use super::Catalog;
use crate::dataset::{ensure_dataset, DatasetError};
use crate::features::FeatureProvider;
use anyhow::{bail, Result};
use std::path::Path;
use tracing::{info, warn};

/// Reads (and if allowed, fetches) the dataset at `data_dir` and builds the
/// catalog. Dataset errors are returned as [`DatasetError`] inside the
/// `anyhow::Error` so callers can tell a missing dataset apart.
pub fn load_catalog<P: AsRef<Path>>(
    data_dir: P,
    dataset_url: &str,
    download_if_missing: bool,
    features: &mut dyn FeatureProvider,
) -> Result<Catalog> {
    let data_dir = data_dir.as_ref();
    info!("Loading dataset from {}...", data_dir.display());
    let tables = ensure_dataset(data_dir, dataset_url, download_if_missing)?;

    info!("Creating song-level dataset...");
    let catalog = Catalog::build(&tables, features)?;

    let duplicates = catalog.duplicate_artist_names();
    if !duplicates.is_empty() {
        warn!(
            "Found {} artist names shared by several artists:",
            duplicates.len()
        );
        for name in duplicates.iter() {
            warn!("- {}", name);
        }
    }
    let untagged = catalog.get_untagged_artists_count();
    if untagged > 0 {
        warn!(
            "{} artists have no tags, their songs are ranked on features only",
            untagged
        );
    }

    if catalog.get_songs_count() == 0 {
        bail!(DatasetError::DataUnavailable {
            path: data_dir.to_path_buf(),
            reason: "the artist table has no rows".to_string(),
        });
    }

    info!(
        "Catalog has:\n{} artists\n{} songs\n{} tags",
        catalog.get_artists_count(),
        catalog.get_songs_count(),
        catalog.get_tags_count()
    );
    Ok(catalog)
}
