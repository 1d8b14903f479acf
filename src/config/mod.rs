mod file_config;

pub use file_config::FileConfig;

use crate::dataset::DEFAULT_DATASET_URL;
use crate::recommend::{RecommenderSettings, DEFAULT_MAX_RESULTS, DEFAULT_MOOD_JITTER};
use crate::text_index::DEFAULT_MAX_FEATURES;
use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub dataset_url: String,
    pub download_if_missing: bool,
    pub captions_path: Option<PathBuf>,
    pub max_results: usize,
    pub mood_jitter: f64,
    pub max_features: usize,
    pub seed: Option<u64>,
    pub classifier_command: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            download_if_missing: true,
            captions_path: None,
            max_results: DEFAULT_MAX_RESULTS,
            mood_jitter: DEFAULT_MOOD_JITTER,
            max_features: DEFAULT_MAX_FEATURES,
            seed: None,
            classifier_command: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Dataset
    pub data_dir: PathBuf,
    pub dataset_url: String,
    pub download_if_missing: bool,
    pub captions_path: Option<PathBuf>,

    pub recommender: RecommenderSettings,

    pub classifier_command: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .or_else(|| cli.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        if data_dir.exists() && !data_dir.is_dir() {
            bail!("data_dir is not a directory: {:?}", data_dir);
        }

        let dataset_url = file.dataset_url.unwrap_or_else(|| cli.dataset_url.clone());
        if dataset_url.trim().is_empty() {
            bail!("dataset_url must not be empty");
        }
        let download_if_missing = file.download_if_missing.unwrap_or(cli.download_if_missing);

        let captions_path = file
            .captions_path
            .map(PathBuf::from)
            .or_else(|| cli.captions_path.clone());

        let max_results = file.max_results.unwrap_or(cli.max_results);
        if max_results == 0 {
            bail!("max_results must be at least 1");
        }
        let mood_jitter = file.mood_jitter.unwrap_or(cli.mood_jitter);
        if !mood_jitter.is_finite() || mood_jitter < 0.0 {
            bail!("mood_jitter must be a non-negative number, got {}", mood_jitter);
        }
        let max_features = file.max_features.unwrap_or(cli.max_features);
        if max_features == 0 {
            bail!("max_features must be at least 1");
        }
        let seed = file.seed.or(cli.seed);

        let classifier_command = file
            .classifier_command
            .or_else(|| cli.classifier_command.clone())
            .filter(|c| !c.trim().is_empty());

        Ok(Self {
            data_dir,
            dataset_url,
            download_if_missing,
            captions_path,
            recommender: RecommenderSettings {
                max_results,
                mood_jitter,
                max_features,
                seed,
            },
            classifier_command,
        })
    }
}
